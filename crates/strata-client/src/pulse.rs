//! Session keep-alive pulses.
//!
//! One recurring pulse task runs per session. It is the only way the client
//! discovers a server-side expiry (idle timeout, server restart) without an
//! explicit operation failing first; everything else must treat a closed
//! session from [`Session::transaction`](crate::session::Session::transaction)
//! as a normal, expected race.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use strata_protocol::PulseRequest;

use crate::session::Session;

/// Outcome of the pulse loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PulseOutcome {
    /// The server stopped tracking the session, or became unreachable.
    Expired,
    /// The session was closed locally and the schedule cancelled.
    Cancelled,
}

/// Run keep-alive pulses for a session until it expires or is cancelled.
///
/// The first tick fires immediately. A tick that finds the session already
/// closed locally skips all work — no RPC — and waits for cancellation to
/// land. A transport failure during the probe is treated as `alive = false`:
/// an unreachable server is assumed to have expired the session.
///
/// On expiry the session is force-closed locally (flag and schedule only —
/// the server already knows, so the notification path is not run) and the
/// loop terminates so no further liveness check executes.
pub(crate) async fn run_pulse(
    session: Arc<Session>,
    interval: Duration,
    cancel: CancellationToken,
) -> PulseOutcome {
    let mut ticker = time::interval(interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if !session.is_open() {
                    // Teardown is underway elsewhere; cancellation will land.
                    continue;
                }
                let request = PulseRequest {
                    session_id: session.id().clone(),
                };
                let alive = match session.transport().pulse_session(request).await {
                    Ok(response) => response.alive,
                    Err(e) => {
                        debug!(session_id = %session.id(), error = %e, "pulse transport failure");
                        false
                    }
                };
                counter!("strata_session_pulses_total").increment(1);
                if !alive {
                    warn!(session_id = %session.id(), "server no longer tracks session, closing locally");
                    counter!("strata_sessions_expired_total").increment(1);
                    session.force_close();
                    return PulseOutcome::Expired;
                }
            }
            () = cancel.cancelled() => {
                return PulseOutcome::Cancelled;
            }
        }
    }
}
