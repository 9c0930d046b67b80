//! Session manager — creates sessions, tracks them for bulk cleanup, and
//! owns the transport handle.

use std::sync::Arc;

use dashmap::DashMap;
use metrics::gauge;
use tracing::info;

use strata_protocol::{SessionId, SessionKind, SessionOptions};

use crate::error::ClientError;
use crate::session::Session;
use crate::transport::Transport;

/// Client for the Strata database server.
///
/// Owns the transport and the set of live sessions. The set is scoped to
/// the client: created with it, drained by [`Client::close`] — there is no
/// process-wide registry.
pub struct Client {
    transport: Arc<dyn Transport>,
    pool: Arc<SessionPool>,
}

impl Client {
    /// Create a client over an established transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            pool: Arc::new(SessionPool::default()),
        }
    }

    /// Open a session and start its keep-alive pulse.
    pub async fn session(
        &self,
        database: &str,
        kind: SessionKind,
        options: SessionOptions,
    ) -> Result<Arc<Session>, ClientError> {
        let session = Session::open(
            Arc::clone(&self.transport),
            Arc::downgrade(&self.pool),
            database,
            kind,
            options,
        )
        .await?;
        self.pool.insert(Arc::clone(&session));
        session.spawn_pulse();
        Ok(session)
    }

    /// Number of sessions currently tracked.
    pub fn session_count(&self) -> usize {
        self.pool.len()
    }

    /// Close every tracked session.
    ///
    /// Sessions already torn down by a failed pulse are drained along with
    /// the rest; their close is a no-op beyond deregistration.
    pub async fn close(&self) {
        let sessions = self.pool.drain();
        info!(sessions = sessions.len(), "closing client");
        for session in sessions {
            session.close().await;
        }
    }
}

/// Concurrency-safe set of live sessions owned by the client.
#[derive(Default)]
pub(crate) struct SessionPool {
    sessions: DashMap<SessionId, Arc<Session>>,
}

impl SessionPool {
    pub(crate) fn insert(&self, session: Arc<Session>) {
        let _ = self.sessions.insert(session.id().clone(), session);
        gauge!("strata_sessions_active").increment(1.0);
    }

    /// Deregister a session. Idempotent; called once by the winning close.
    pub(crate) fn remove(&self, id: &SessionId) {
        if self.sessions.remove(id).is_some() {
            gauge!("strata_sessions_active").decrement(1.0);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Remove and return every tracked session.
    pub(crate) fn drain(&self) -> Vec<Arc<Session>> {
        let ids: Vec<SessionId> = self.sessions.iter().map(|e| e.key().clone()).collect();
        let mut drained = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some((_, session)) = self.sessions.remove(&id) {
                gauge!("strata_sessions_active").decrement(1.0);
                drained.push(session);
            }
        }
        drained
    }
}
