//! Client option snapshots.
//!
//! Options are captured once when a session (or transaction) is opened and
//! serialized verbatim into the open request. Unset fields are omitted on
//! the wire so the server applies its own defaults.

use serde::{Deserialize, Serialize};

/// Configuration snapshot supplied when opening a session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOptions {
    /// Enable rule inference for queries in this session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infer: Option<bool>,
    /// Number of answers fetched per server round trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefetch_size: Option<u32>,
    /// Server-side idle timeout before the session is expired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_idle_timeout_millis: Option<u64>,
    /// Default timeout applied to transactions opened under this session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_timeout_millis: Option<u64>,
}

/// Configuration snapshot supplied when opening a transaction.
///
/// Overrides the session-level defaults for a single transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOptions {
    /// Timeout for this transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_timeout_millis: Option<u64>,
}
