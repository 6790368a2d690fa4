//! Application layer for the relay chat client
//!
//! Pure state machines and a generic runtime, so the same orchestration code
//! runs against a real terminal and against a scripted driver in tests.
//!
//! # Components
//!
//! - [`App`]: UI state machine (input commands, user list, message log)
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic event loop joining App, connection manager and Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod command;
mod driver;
mod event;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::{App, MAX_HISTORY};
pub use command::Command;
pub use driver::{Driver, DriverEvent};
pub use event::AppEvent;
pub use relaychat_client::TransportEvent;
pub use relaychat_core::{ConnectionConfig, ConnectionState, ConnectionStatus};
pub use relaychat_proto::DisplayName;
pub use runtime::Runtime;
pub use state::{ChatLine, LineKind};
