//! Crate-private test doubles.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use strata_protocol::{
    CloseSessionRequest, OpenSessionRequest, OpenSessionResponse, PulseRequest, PulseResponse,
    SessionId,
};

use crate::transport::{Transport, TransportError};

/// Scriptable in-memory transport with call counters.
///
/// Failure flags and the liveness answer can be flipped mid-test; the open
/// exchange can simulate a round trip via `open_delay` (driven by the paused
/// tokio clock).
pub(crate) struct FakeTransport {
    pub alive: AtomicBool,
    pub fail_reconnect: AtomicBool,
    pub fail_open: AtomicBool,
    pub fail_pulse: AtomicBool,
    pub fail_close: AtomicBool,
    pub open_delay: Duration,
    pub server_duration_millis: u64,
    pub reconnects: AtomicUsize,
    pub opens: AtomicUsize,
    pub pulses: AtomicUsize,
    pub closes: AtomicUsize,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::with_open_timing(Duration::ZERO, 0)
    }

    pub(crate) fn with_open_timing(open_delay: Duration, server_duration_millis: u64) -> Self {
        Self {
            alive: AtomicBool::new(true),
            fail_reconnect: AtomicBool::new(false),
            fail_open: AtomicBool::new(false),
            fail_pulse: AtomicBool::new(false),
            fail_close: AtomicBool::new(false),
            open_delay,
            server_duration_millis,
            reconnects: AtomicUsize::new(0),
            opens: AtomicUsize::new(0),
            pulses: AtomicUsize::new(0),
            closes: AtomicUsize::new(0),
        }
    }

    fn unavailable(context: &str) -> TransportError {
        TransportError::Unavailable {
            message: context.to_owned(),
        }
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn reconnect(&self) -> Result<(), TransportError> {
        let _ = self.reconnects.fetch_add(1, Ordering::SeqCst);
        if self.fail_reconnect.load(Ordering::SeqCst) {
            return Err(Self::unavailable("reconnect refused"));
        }
        Ok(())
    }

    async fn open_session(
        &self,
        _request: OpenSessionRequest,
    ) -> Result<OpenSessionResponse, TransportError> {
        let _ = self.opens.fetch_add(1, Ordering::SeqCst);
        if self.fail_open.load(Ordering::SeqCst) {
            return Err(Self::unavailable("open refused"));
        }
        tokio::time::sleep(self.open_delay).await;
        Ok(OpenSessionResponse {
            session_id: SessionId::generate(),
            server_duration_millis: self.server_duration_millis,
        })
    }

    async fn pulse_session(&self, _request: PulseRequest) -> Result<PulseResponse, TransportError> {
        let _ = self.pulses.fetch_add(1, Ordering::SeqCst);
        if self.fail_pulse.load(Ordering::SeqCst) {
            return Err(Self::unavailable("pulse refused"));
        }
        Ok(PulseResponse {
            alive: self.alive.load(Ordering::SeqCst),
        })
    }

    async fn close_session(&self, _request: CloseSessionRequest) -> Result<(), TransportError> {
        let _ = self.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_close.load(Ordering::SeqCst) {
            return Err(Self::unavailable("close refused"));
        }
        Ok(())
    }
}
