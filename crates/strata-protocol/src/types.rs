//! Session and transaction kind enums.

use serde::{Deserialize, Serialize};

/// What a session may operate on.
///
/// A `Data` session reads and writes instance data; a `Schema` session is
/// required for type-level changes. The kind is fixed at open time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// Instance data reads and writes.
    Data,
    /// Type-level (schema) changes.
    Schema,
}

/// Access mode of a transaction opened under a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Read-only snapshot.
    Read,
    /// Read-write.
    Write,
}
