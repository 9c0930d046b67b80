//! Transaction handle — a local proxy for one logical transaction opened
//! under a session.
//!
//! The handle's own request protocol is out of scope here; what matters to
//! the session manager is that every handle it registers can be closed
//! exactly once, from either the caller or the session's cascade.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use strata_protocol::{SessionId, TransactionId, TransactionKind, TransactionOptions};

/// Why a transaction handle was closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    /// The caller closed the handle.
    Explicit,
    /// The owning session closed and cascaded to its transactions.
    SessionClosed,
}

/// A live transaction bound to one session.
#[derive(Debug)]
pub struct Transaction {
    id: TransactionId,
    session_id: SessionId,
    kind: TransactionKind,
    options: TransactionOptions,
    network_latency_millis: i64,
    is_open: AtomicBool,
    close_reason: Mutex<Option<CloseReason>>,
}

impl Transaction {
    pub(crate) fn new(
        session_id: SessionId,
        kind: TransactionKind,
        options: TransactionOptions,
        network_latency_millis: i64,
    ) -> Self {
        Self {
            id: TransactionId::generate(),
            session_id,
            kind,
            options,
            network_latency_millis,
            is_open: AtomicBool::new(true),
            close_reason: Mutex::new(None),
        }
    }

    /// Identifier of this handle.
    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    /// Session this transaction was opened under.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Access mode.
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Options snapshot supplied at open.
    pub fn options(&self) -> &TransactionOptions {
        &self.options
    }

    /// The owning session's network latency estimate, in milliseconds.
    ///
    /// Callers fold this into timeout budgets so a deadline covers transit
    /// time on top of server-side work. Signed; see
    /// [`Session::network_latency_millis`](crate::session::Session::network_latency_millis).
    pub fn network_latency_millis(&self) -> i64 {
        self.network_latency_millis
    }

    /// Whether the handle is still open.
    pub fn is_open(&self) -> bool {
        self.is_open.load(Ordering::Acquire)
    }

    /// Why the handle was closed, once it has been.
    pub fn close_reason(&self) -> Option<CloseReason> {
        *self.close_reason.lock()
    }

    /// Close the handle. Idempotent; closing twice equals closing once.
    pub fn close(&self) {
        let _ = self.close_with(CloseReason::Explicit);
    }

    /// Close with an explicit reason, reporting whether this call performed
    /// the transition. Only the first close records its reason.
    pub(crate) fn close_with(&self, reason: CloseReason) -> bool {
        if self
            .is_open
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }
        *self.close_reason.lock() = Some(reason);
        true
    }
}
