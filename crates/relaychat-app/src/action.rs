//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use relaychat_proto::DisplayName;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Register a display name with the relay.
    SetName(DisplayName),

    /// Broadcast a chat line.
    SendText(String),

    /// Throw away the failed connection and start over, keeping the name.
    Restart,
}
