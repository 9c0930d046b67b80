//! # strata-client
//!
//! Client-side session manager for the Strata database server.
//!
//! A [`Session`] is a server-tracked resource with a bounded lifetime: the
//! client keeps it alive with periodic pulses, opens any number of
//! concurrent [`Transaction`] handles against it, and tears it down exactly
//! once — from either local initiative ([`Session::close`]) or remote
//! expiry detected by the pulse task.
//!
//! - **[`Client`]**: creates sessions over a [`Transport`] and tracks them
//!   for bulk cleanup
//! - **[`Session`]**: the lifecycle state machine — open, transaction
//!   creation gated on liveness, cascade close
//! - **[`Transaction`]**: local handle proxy with an idempotent close
//! - **[`Transport`]**: the seam to whatever owns the physical connection
//! - **[`ClientError`]**: `InvalidArgument` / `Connection` / `SessionClosed`
//!   split so callers can pattern-match expected races from real failures

#![deny(unsafe_code)]

pub mod client;
pub mod error;
mod pulse;
mod registry;
pub mod session;
pub mod transaction;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::Client;
pub use error::ClientError;
pub use session::Session;
pub use transaction::{CloseReason, Transaction};
pub use transport::{Transport, TransportError};

pub use strata_protocol::{
    SessionId, SessionKind, SessionOptions, TransactionId, TransactionKind, TransactionOptions,
};

/// Wire contract types, re-exported for transport implementations.
pub use strata_protocol as protocol;
