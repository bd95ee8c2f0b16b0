//! Client-facing error taxonomy.
//!
//! Every fallible remote operation in this crate resolves to exactly one of
//! two kinds: the service answered the call with a fault, or the call never
//! produced a service answer at all. Callers that need to distinguish "the
//! tracker rejected this" from "the wire ate this" match on the variant.
//! No other error type crosses the crate's public API.

/// Error returned by every remote call in this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The service processed the call and reported an application fault.
    #[error("server fault: {detail}")]
    ServerFault {
        /// Fault code sent by the service, when it sent one.
        code: Option<String>,
        /// Human-readable fault description from the service.
        detail: String,
    },

    /// The call failed before any service answer arrived: connection,
    /// DNS, TLS, timeout, or an undecodable response body.
    #[error("transport failure: {detail}")]
    Transport {
        /// Description of the transport-level failure.
        detail: String,
    },
}

impl ClientError {
    /// Build a [`ClientError::ServerFault`].
    pub fn fault(code: Option<String>, detail: impl Into<String>) -> Self {
        Self::ServerFault {
            code,
            detail: detail.into(),
        }
    }

    /// Build a [`ClientError::Transport`].
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
        }
    }

    /// True when the service itself rejected the call.
    #[must_use]
    pub const fn is_server_fault(&self) -> bool {
        matches!(self, Self::ServerFault { .. })
    }

    /// True when the call never reached a service answer.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
