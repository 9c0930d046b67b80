//! Client error taxonomy.
//!
//! Three kinds, deliberately distinct so callers can pattern-match behavior:
//! [`ClientError::InvalidArgument`] is a local caller bug and is never
//! retried; [`ClientError::Connection`] is a transport failure surfaced to
//! the user; [`ClientError::SessionClosed`] is an expected race — the
//! session died underneath the caller, who should open a new one.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors surfaced by the session manager.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Malformed caller input, detected before any network call.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the input.
        message: String,
    },

    /// The transport failed while performing an operation.
    #[error("connection failed during {operation}")]
    Connection {
        /// The operation that was in flight.
        operation: String,
        /// The underlying transport failure.
        #[source]
        source: TransportError,
    },

    /// The session is closed, locally or server-side.
    ///
    /// Expected under normal operation (server-side expiry races against
    /// callers); obtain a new session rather than retrying on this one.
    #[error("session is closed")]
    SessionClosed,
}

impl ClientError {
    /// Local validation failure.
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Transport failure wrapped with the operation that was in flight.
    pub(crate) fn connection(operation: impl Into<String>, source: TransportError) -> Self {
        Self::Connection {
            operation: operation.into(),
            source,
        }
    }
}
