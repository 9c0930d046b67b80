//! Branded ID newtypes.
//!
//! A [`SessionId`] is issued by the server at open time and treated as an
//! opaque token by the client; it is replayed verbatim on every request that
//! references the session. A [`TransactionId`] is generated client-side.
//! Both are newtypes over `String` so one can never be passed where the
//! other is expected.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! token_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh ID (UUID v7, time-ordered).
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// The token as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

token_id! {
    /// Opaque session token issued by the server at open time.
    ///
    /// Immutable for the session's life. The client never inspects it.
    SessionId
}

token_id! {
    /// Identifier for a transaction handle opened under a session.
    TransactionId
}
