//! # strata-protocol
//!
//! Abstract wire contract for the Strata database client.
//!
//! This crate is pure data — no I/O, no concurrency. It provides the shared
//! vocabulary between the client and whatever transport carries it:
//!
//! - **Branded IDs**: [`SessionId`] (server-issued) and [`TransactionId`]
//!   (client-generated) as newtypes for type safety
//! - **Kinds**: [`SessionKind`] and [`TransactionKind`] enums
//! - **Messages**: open/pulse/close request and response structs
//! - **Options**: [`SessionOptions`] and [`TransactionOptions`] snapshots
//!   serialized into the open request

#![deny(unsafe_code)]

pub mod ids;
pub mod messages;
pub mod options;
pub mod types;

pub use ids::{SessionId, TransactionId};
pub use messages::{
    CloseSessionRequest, OpenSessionRequest, OpenSessionResponse, PulseRequest, PulseResponse,
};
pub use options::{SessionOptions, TransactionOptions};
pub use types::{SessionKind, TransactionKind};
