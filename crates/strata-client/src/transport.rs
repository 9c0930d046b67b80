//! Transport seam.
//!
//! The client never constructs channels itself. Whatever owns the physical
//! connection implements [`Transport`]; the session manager only requires
//! that `reconnect` is idempotent and safe to call while other requests are
//! in flight.

use async_trait::async_trait;
use thiserror::Error;

use strata_protocol::{
    CloseSessionRequest, OpenSessionRequest, OpenSessionResponse, PulseRequest, PulseResponse,
};

/// Failures at the transport layer.
///
/// Retry and backoff are the transport's own concern; by the time one of
/// these reaches the session manager the request is considered failed.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The channel is down and could not be re-established.
    #[error("channel unavailable: {message}")]
    Unavailable {
        /// Why the channel is unavailable.
        message: String,
    },

    /// The request did not complete in time.
    #[error("request timed out after {timeout_millis}ms")]
    Timeout {
        /// How long we waited.
        timeout_millis: u64,
    },

    /// I/O failure on the underlying connection.
    #[error("transport I/O failure")]
    Io(#[from] std::io::Error),

    /// The server replied with something the wire contract does not allow.
    #[error("protocol violation: {message}")]
    Protocol {
        /// What was malformed.
        message: String,
    },
}

/// Handle to the persistent connection carrying session traffic.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Re-establish the underlying channel.
    ///
    /// Idempotent; must be safe to call concurrently with in-flight
    /// requests. Called before opening a session (never open on a known-dead
    /// channel) and before the best-effort close notification.
    async fn reconnect(&self) -> Result<(), TransportError>;

    /// Synchronous session-open exchange.
    async fn open_session(
        &self,
        request: OpenSessionRequest,
    ) -> Result<OpenSessionResponse, TransportError>;

    /// Liveness probe for an open session.
    async fn pulse_session(&self, request: PulseRequest) -> Result<PulseResponse, TransportError>;

    /// Notify the server that a session is closed. Best-effort.
    async fn close_session(&self, request: CloseSessionRequest) -> Result<(), TransportError>;
}
