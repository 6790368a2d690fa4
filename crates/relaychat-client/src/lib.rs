//! Transport boundary for the relay chat client.
//!
//! The connection state machine in `relaychat-core` treats the transport as
//! an opaque capability: open a URL, send text, close, and be told about
//! [`TransportEvent`]s. Any duplex text-message stream satisfies that.
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides a WebSocket
//! implementation:
//! - [`transport::ConnectedClient`]: handle to one connection attempt
//! - [`transport::open_with_config`]: start connecting to a relay

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod event;

#[cfg(feature = "transport")]
pub mod transport;

pub use error::TransportError;
pub use event::TransportEvent;
