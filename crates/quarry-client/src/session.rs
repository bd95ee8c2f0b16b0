//! Session state issued by a successful login.

use std::fmt;

use crate::wire::SessionRow;

/// Opaque session token the service issues at login.
///
/// Both `Display` and `Debug` redact all but a short prefix so the token
/// can appear in logs without leaking a usable credential. The raw value
/// is only reachable through [`SessionHash::expose`], which wire code uses
/// to put it on requests.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionHash(String);

impl SessionHash {
    /// Wrap a raw session hash.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw token, for request payloads only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() <= 12 {
            return f.write_str("[redacted]");
        }
        let prefix: String = self.0.chars().take(8).collect();
        write!(f, "{prefix}...")
    }
}

impl fmt::Debug for SessionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionHash({self})")
    }
}

/// An authenticated session: the token plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub hash: SessionHash,
    pub user_id: i32,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Self {
            hash: SessionHash::new(row.session_hash),
            user_id: row.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_redacts_all_but_prefix() {
        let hash = SessionHash::new("a1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6");
        assert_eq!(hash.to_string(), "a1b2c3d4...");
    }

    #[test]
    fn debug_redacts_too() {
        let hash = SessionHash::new("a1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6");
        assert_eq!(format!("{hash:?}"), "SessionHash(a1b2c3d4...)");
    }

    #[test]
    fn short_hashes_are_fully_redacted() {
        let hash = SessionHash::new("abc123");
        assert_eq!(hash.to_string(), "[redacted]");
    }

    #[test]
    fn expose_returns_the_raw_token() {
        let hash = SessionHash::new("a1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6");
        assert_eq!(hash.expose(), "a1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6");
    }

    #[test]
    fn session_from_row() {
        let session = Session::from(SessionRow {
            session_hash: "cafe0000cafe0000cafe0000cafe0000".to_string(),
            user_id: 42,
        });
        assert_eq!(session.user_id, 42);
        assert_eq!(session.hash.expose(), "cafe0000cafe0000cafe0000cafe0000");
    }
}
