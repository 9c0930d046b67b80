//! Request and response messages of the session wire contract.
//!
//! The encoding underneath (gRPC, framed JSON, ...) is the transport's
//! business; these structs define the fields each exchange carries.

use serde::{Deserialize, Serialize};

use crate::ids::SessionId;
use crate::options::SessionOptions;
use crate::types::SessionKind;

/// Open a new session against a database.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSessionRequest {
    /// Name of the database to open against.
    pub database: String,
    /// Declared session kind.
    pub kind: SessionKind,
    /// Options snapshot, applied server-side for the session's life.
    pub options: SessionOptions,
}

/// Server reply to [`OpenSessionRequest`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSessionResponse {
    /// Token the client must replay on every subsequent request.
    pub session_id: SessionId,
    /// How long the server spent processing the open, in milliseconds.
    ///
    /// Subtracted from the locally observed round trip to estimate pure
    /// network transit time.
    pub server_duration_millis: u64,
}

/// Keep-alive probe for a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseRequest {
    /// Session being probed.
    pub session_id: SessionId,
}

/// Server reply to [`PulseRequest`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseResponse {
    /// Whether the server still tracks the session.
    pub alive: bool,
}

/// Notify the server that a session is closed.
///
/// Best-effort; the reply carries no payload beyond success or failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseSessionRequest {
    /// Session being closed.
    pub session_id: SessionId,
}
