//! Session lifecycle — the client-side state machine for one server-tracked
//! session.
//!
//! A session is opened with a synchronous RPC, kept alive by a recurring
//! pulse task, hands out transaction handles while open, and is torn down
//! exactly once — by whichever of local [`Session::close`] or a failed pulse
//! gets there first.
//!
//! # Locking
//!
//! Two layers guard the state, on purpose:
//!
//! - `is_open` is an atomic flag, the single source of truth for liveness.
//!   The OPEN→CLOSED transition is a compare-and-set, so exactly one path
//!   performs teardown.
//! - `access` is a read/write lock serializing the coarse distinction
//!   between "any number of concurrent transaction creations" (read side)
//!   and "the single close" (write side). The close path holds the write
//!   lock across its teardown awaits, so a caller whose `close()` returns
//!   knows teardown has completed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use strata_protocol::{
    CloseSessionRequest, OpenSessionRequest, SessionId, SessionKind, SessionOptions,
    TransactionKind, TransactionOptions,
};

use crate::client::SessionPool;
use crate::error::ClientError;
use crate::pulse::run_pulse;
use crate::registry::TransactionRegistry;
use crate::transaction::{CloseReason, Transaction};
use crate::transport::Transport;

/// Interval between keep-alive pulses.
pub(crate) const PULSE_INTERVAL: Duration = Duration::from_millis(5_000);

/// One authenticated, server-tracked unit of work context.
pub struct Session {
    id: SessionId,
    database: String,
    kind: SessionKind,
    options: SessionOptions,
    transport: Arc<dyn Transport>,
    pool: Weak<SessionPool>,
    transactions: TransactionRegistry,
    access: RwLock<()>,
    is_open: AtomicBool,
    network_latency_millis: i64,
    pulse: CancellationToken,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("database", &self.database)
            .field("kind", &self.kind)
            .field("options", &self.options)
            .field("network_latency_millis", &self.network_latency_millis)
            .field("is_open", &self.is_open)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Open a session against `database`.
    ///
    /// Forces a transport reconnect first so a session is never opened on a
    /// known-dead channel, then issues the open RPC and measures the round
    /// trip. On transport failure nothing is constructed and there is
    /// nothing to clean up.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub(crate) async fn open(
        transport: Arc<dyn Transport>,
        pool: Weak<SessionPool>,
        database: &str,
        kind: SessionKind,
        options: SessionOptions,
    ) -> Result<Arc<Self>, ClientError> {
        if database.trim().is_empty() {
            return Err(ClientError::invalid_argument(
                "database name must be non-empty",
            ));
        }

        transport
            .reconnect()
            .await
            .map_err(|e| ClientError::connection("session open", e))?;

        let request = OpenSessionRequest {
            database: database.to_owned(),
            kind,
            options: options.clone(),
        };
        let started = Instant::now();
        let response = transport
            .open_session(request)
            .await
            .map_err(|e| ClientError::connection("session open", e))?;
        // Round trip minus server-side work isolates pure network transit.
        // Signed: clock skew or a slow server clock can push it below zero,
        // and callers see the estimate as-is.
        let network_latency_millis =
            started.elapsed().as_millis() as i64 - response.server_duration_millis as i64;

        info!(
            session_id = %response.session_id,
            database,
            kind = ?kind,
            network_latency_millis,
            "session open"
        );

        Ok(Arc::new(Self {
            id: response.session_id,
            database: database.to_owned(),
            kind,
            options,
            transport,
            pool,
            transactions: TransactionRegistry::default(),
            access: RwLock::new(()),
            is_open: AtomicBool::new(true),
            network_latency_millis,
            pulse: CancellationToken::new(),
        }))
    }

    /// Start the recurring pulse task for this session.
    ///
    /// The first pulse fires immediately, then every [`PULSE_INTERVAL`].
    pub(crate) fn spawn_pulse(self: &Arc<Self>) {
        let session = Arc::clone(self);
        let cancel = self.pulse.clone();
        let _ = tokio::spawn(async move {
            let outcome = run_pulse(session, PULSE_INTERVAL, cancel).await;
            debug!(outcome = ?outcome, "pulse loop exited");
        });
    }

    /// Server-issued session token.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Database this session was opened against.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Declared session kind.
    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    /// Options snapshot supplied at open.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Network transit estimate from open time, in milliseconds.
    ///
    /// `local round trip − server-reported processing duration`, computed
    /// once. May be negative under clock skew; not clamped.
    pub fn network_latency_millis(&self) -> i64 {
        self.network_latency_millis
    }

    /// Whether the session is open.
    ///
    /// Lock-free; may be momentarily stale relative to an in-flight close
    /// but never reports open after a completed close.
    pub fn is_open(&self) -> bool {
        self.is_open.load(Ordering::Acquire)
    }

    /// Number of transaction handles currently registered.
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Open a transaction under this session.
    ///
    /// Never performs network I/O. Fails with
    /// [`ClientError::SessionClosed`] once the session is closed — callers
    /// must not retry on the same session.
    pub async fn transaction(
        &self,
        kind: TransactionKind,
        options: TransactionOptions,
    ) -> Result<Arc<Transaction>, ClientError> {
        let _guard = self.access.read().await;
        if !self.is_open() {
            return Err(ClientError::SessionClosed);
        }
        let transaction = Arc::new(Transaction::new(
            self.id.clone(),
            kind,
            options,
            self.network_latency_millis,
        ));
        self.transactions.add(Arc::clone(&transaction));
        Ok(transaction)
    }

    /// Close the session. Idempotent; the losing caller returns without
    /// error and without repeating teardown.
    ///
    /// The winner, still under the exclusive lock: cascades close to every
    /// registered transaction, deregisters from the owning pool, cancels the
    /// pulse schedule, then makes a best-effort attempt to notify the
    /// server — reconnect and notification failures are swallowed, since
    /// local state is already authoritative.
    pub async fn close(&self) {
        let _guard = self.access.write().await;
        if self
            .is_open
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        let closed = self.transactions.drain_and_close_all(CloseReason::SessionClosed);
        debug!(session_id = %self.id, transactions = closed, "cascaded close to transactions");

        if let Some(pool) = self.pool.upgrade() {
            pool.remove(&self.id);
        }
        self.pulse.cancel();
        info!(session_id = %self.id, "session closed");

        if let Err(e) = self.transport.reconnect().await {
            warn!(session_id = %self.id, error = %e, "reconnect before close notification failed");
            return;
        }
        let request = CloseSessionRequest {
            session_id: self.id.clone(),
        };
        if let Err(e) = self.transport.close_session(request).await {
            // Most likely the server already expired the session or is gone.
            debug!(session_id = %self.id, error = %e, "close notification failed");
        }
    }

    /// Force the session closed without the notification path.
    ///
    /// Called by the pulse task when the server reports (or is assumed to
    /// have) expired the session. Mutates only the atomic flag and cancels
    /// the pulse schedule; registered transactions and pool membership are
    /// left for the next explicit close to observe.
    pub(crate) fn force_close(&self) {
        if self
            .is_open
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.pulse.cancel();
        }
    }

    pub(crate) fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    #[cfg(test)]
    pub(crate) fn pulse_cancelled(&self) -> bool {
        self.pulse.is_cancelled()
    }
}
