//! Relay chat client core
//!
//! Sans-IO connection lifecycle for the relay chat client. The
//! [`ConnectionManager`] owns the [`Session`] and decides when to open a
//! transport, when to retry, when to give up and when to re-announce the
//! user's display name. It performs no I/O itself: every operation returns
//! [`ConnectionAction`]s for a driver to execute.
//!
//! # Components
//!
//! - [`ConnectionManager`]: connect/retry/give-up state machine
//! - [`Session`]: display name, connection state and retry counter
//! - [`ConnectionConfig`]: relay URL and retry policy
//! - [`ConnectionError`]: failure taxonomy surfaced to the UI

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod connection;
pub mod error;
pub mod session;

pub use connection::{
    ConnectionAction, ConnectionConfig, ConnectionEvent, ConnectionManager, ConnectionStatus,
    DEFAULT_MAX_RECONNECT_ATTEMPTS, DEFAULT_RECONNECT_DELAY, DEFAULT_RELAY_URL,
};
pub use error::ConnectionError;
pub use relaychat_proto::{DisplayName, InboundEvent, InvalidNameError, OutboundCommand};
pub use session::{ConnectionState, Session};
