//! Thread-safe bag of live transaction handles.
//!
//! Many callers insert concurrently; the closing thread drains exactly once,
//! under the session's exclusive lock. Handles are never removed
//! individually — a handle closed by its caller simply drains as a no-op.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use strata_protocol::TransactionId;

use crate::transaction::{CloseReason, Transaction};

/// Live transaction handles owned by one session.
#[derive(Default)]
pub(crate) struct TransactionRegistry {
    entries: DashMap<TransactionId, Arc<Transaction>>,
}

impl TransactionRegistry {
    /// Register a handle. Safe under arbitrary concurrent insertion.
    pub(crate) fn add(&self, transaction: Arc<Transaction>) {
        let _ = self
            .entries
            .insert(transaction.id().clone(), transaction);
    }

    /// Number of registered handles.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Close every registered handle and empty the registry.
    ///
    /// Iterates a snapshot; a handle that is already closed is skipped
    /// without disturbing the rest. Returns how many handles this call
    /// actually transitioned.
    pub(crate) fn drain_and_close_all(&self, reason: CloseReason) -> usize {
        let snapshot: Vec<Arc<Transaction>> = self
            .entries
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        self.entries.clear();

        let mut closed = 0;
        for transaction in snapshot {
            if transaction.close_with(reason) {
                closed += 1;
            } else {
                debug!(transaction_id = %transaction.id(), "already closed, skipping");
            }
        }
        closed
    }
}
