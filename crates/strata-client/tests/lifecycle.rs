//! End-to-end session lifecycle scenarios driven through the public API.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use assert_matches::assert_matches;
use async_trait::async_trait;

use strata_client::protocol::{
    CloseSessionRequest, OpenSessionRequest, OpenSessionResponse, PulseRequest, PulseResponse,
};
use strata_client::{
    Client, ClientError, CloseReason, SessionId, SessionKind, SessionOptions, TransactionKind,
    TransactionOptions, Transport, TransportError,
};

/// Minimal scripted server: answers every exchange, counts calls, and lets
/// a test flip the liveness answer.
struct ScriptedServer {
    alive: AtomicBool,
    reconnects: AtomicUsize,
    pulses: AtomicUsize,
    closes: AtomicUsize,
}

impl ScriptedServer {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            alive: AtomicBool::new(true),
            reconnects: AtomicUsize::new(0),
            pulses: AtomicUsize::new(0),
            closes: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Transport for ScriptedServer {
    async fn reconnect(&self) -> Result<(), TransportError> {
        let _ = self.reconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn open_session(
        &self,
        _request: OpenSessionRequest,
    ) -> Result<OpenSessionResponse, TransportError> {
        Ok(OpenSessionResponse {
            session_id: SessionId::generate(),
            server_duration_millis: 0,
        })
    }

    async fn pulse_session(&self, _request: PulseRequest) -> Result<PulseResponse, TransportError> {
        let _ = self.pulses.fetch_add(1, Ordering::SeqCst);
        Ok(PulseResponse {
            alive: self.alive.load(Ordering::SeqCst),
        })
    }

    async fn close_session(&self, _request: CloseSessionRequest) -> Result<(), TransportError> {
        let _ = self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test]
async fn data_session_with_concurrent_transactions_and_closes() {
    let server = ScriptedServer::new();
    let client = Client::new(Arc::clone(&server) as Arc<dyn Transport>);

    let session = client
        .session("inventory", SessionKind::Data, SessionOptions::default())
        .await
        .unwrap();

    // Three transactions opened concurrently.
    let (a, b, c) = tokio::join!(
        session.transaction(TransactionKind::Read, TransactionOptions::default()),
        session.transaction(TransactionKind::Write, TransactionOptions::default()),
        session.transaction(TransactionKind::Read, TransactionOptions::default()),
    );
    let transactions = [a.unwrap(), b.unwrap(), c.unwrap()];
    assert_eq!(session.transaction_count(), 3);

    // Close raced from two tasks; whichever wins performs teardown once.
    let ((), ()) = tokio::join!(session.close(), session.close());

    assert!(!session.is_open());
    for tx in &transactions {
        assert!(!tx.is_open());
        assert_eq!(tx.close_reason(), Some(CloseReason::SessionClosed));
    }
    // Exactly one deregistration and one close notification.
    assert_eq!(client.session_count(), 0);
    assert_eq!(server.closes.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn ten_alive_pulses_leave_the_session_untouched() {
    let server = ScriptedServer::new();
    let client = Client::new(Arc::clone(&server) as Arc<dyn Transport>);

    let session = client
        .session("inventory", SessionKind::Data, SessionOptions::default())
        .await
        .unwrap();

    // Immediate first pulse plus one per 5s period.
    tokio::time::sleep(Duration::from_millis(45_001)).await;

    assert_eq!(server.pulses.load(Ordering::SeqCst), 10);
    assert!(session.is_open());
    assert_eq!(client.session_count(), 1);

    // Still fully usable afterwards.
    let tx = session
        .transaction(TransactionKind::Write, TransactionOptions::default())
        .await
        .unwrap();
    assert!(tx.is_open());

    client.close().await;
}

#[tokio::test(start_paused = true)]
async fn server_expiry_is_discovered_by_the_pulse() {
    let server = ScriptedServer::new();
    let client = Client::new(Arc::clone(&server) as Arc<dyn Transport>);

    let session = client
        .session("inventory", SessionKind::Data, SessionOptions::default())
        .await
        .unwrap();
    let tx = session
        .transaction(TransactionKind::Read, TransactionOptions::default())
        .await
        .unwrap();

    // The server expires the session between pulses.
    server.alive.store(false, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(5_001)).await;

    assert!(!session.is_open());
    // Discovery does not run the notification path.
    assert_eq!(server.closes.load(Ordering::SeqCst), 0);

    // Existing handles are untouched by the pulse; callers observe the
    // closed session on their next transaction request.
    assert!(tx.is_open());
    let result = session
        .transaction(TransactionKind::Read, TransactionOptions::default())
        .await;
    assert_matches!(result, Err(ClientError::SessionClosed));

    client.close().await;
    assert_eq!(client.session_count(), 0);
}

#[tokio::test]
async fn transactions_racing_a_close_are_never_dropped() {
    let server = ScriptedServer::new();
    let client = Client::new(Arc::clone(&server) as Arc<dyn Transport>);

    let session = client
        .session("inventory", SessionKind::Data, SessionOptions::default())
        .await
        .unwrap();

    let mut openers = Vec::new();
    for _ in 0..12 {
        let session = Arc::clone(&session);
        openers.push(tokio::spawn(async move {
            session
                .transaction(TransactionKind::Write, TransactionOptions::default())
                .await
        }));
    }
    let closer = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.close().await })
    };

    closer.await.unwrap();
    for opener in openers {
        match opener.await.unwrap() {
            // Granted before the close won: swept up by the cascade.
            Ok(tx) => {
                assert!(!tx.is_open());
                assert_eq!(tx.close_reason(), Some(CloseReason::SessionClosed));
            }
            // Or refused with the expected kind — never anything else.
            Err(e) => assert_matches!(e, ClientError::SessionClosed),
        }
    }
    assert_eq!(server.closes.load(Ordering::SeqCst), 1);
}
