//! The authenticated client handle.

use std::fmt;

use crate::binding::Binding;
use crate::error::ClientError;
use crate::model::Group;
use crate::session::{Session, SessionHash};

/// An authenticated connection to one tracker service: a [`Binding`] plus
/// the session every call borrows.
///
/// Sessions are single-shot: [`TrackerClient::login`] opens one,
/// [`TrackerClient::logout`] consumes the client and closes it. There is
/// no re-login or token refresh behind the scenes.
pub struct TrackerClient {
    binding: Box<dyn Binding>,
    session: Session,
}

impl TrackerClient {
    /// Log in and wrap the opened session.
    ///
    /// # Errors
    ///
    /// Propagates the login call's [`ClientError`] unchanged.
    pub fn login(
        binding: Box<dyn Binding>,
        login_name: &str,
        password: &str,
    ) -> Result<Self, ClientError> {
        let session = Session::from(binding.login(login_name, password)?);
        tracing::debug!(user_id = session.user_id, hash = %session.hash, "session opened");
        Ok(Self { binding, session })
    }

    /// Close the session. Consumes the client; the hash is dead afterwards
    /// whether or not the service acknowledged the logout.
    ///
    /// # Errors
    ///
    /// Propagates the logout call's [`ClientError`] unchanged.
    pub fn logout(self) -> Result<(), ClientError> {
        tracing::debug!(hash = %self.session.hash, "session closing");
        self.binding.logout(&self.session.hash)
    }

    /// The open session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The session hash, as binding calls expect it.
    #[must_use]
    pub const fn session_hash(&self) -> &SessionHash {
        &self.session.hash
    }

    /// The underlying binding.
    pub fn binding(&self) -> &dyn Binding {
        self.binding.as_ref()
    }

    /// List the project groups the logged-in user belongs to.
    ///
    /// # Errors
    ///
    /// Propagates the discovery call's [`ClientError`] unchanged.
    pub fn my_groups(&self) -> Result<Vec<Group>, ClientError> {
        let rows = self.binding.my_groups(&self.session.hash)?;
        Ok(rows.into_iter().map(Group::from).collect())
    }
}

impl fmt::Debug for TrackerClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerClient")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
