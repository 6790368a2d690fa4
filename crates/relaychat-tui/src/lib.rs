//! Terminal UI for the relay chat client
//!
//! A thin shell over [`relaychat_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`relaychat_app::Runtime`].
//!
//! This crate only handles key input, rendering and wiring the WebSocket
//! transport into the driver.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod input;
pub mod terminal;
pub mod ui;

pub use input::{InputState, KeyInput};
pub use relaychat_app::{App, AppAction, AppEvent, Driver, DriverEvent, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
