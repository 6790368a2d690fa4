//! Client session state.
//!
//! One [`Session`] exists per client process. It is owned by the
//! [`crate::ConnectionManager`], which is the only code allowed to move it
//! between states.

use std::fmt;

use relaychat_proto::DisplayName;

/// Connection lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    /// Initial state - no connection attempted yet
    Disconnected,
    /// Transport open in progress
    Connecting,
    /// Transport open, frames flow both ways
    Connected,
    /// Transport closed, waiting for the reconnect timer
    Reconnecting,
    /// Reconnect cap reached (terminal, requires a restart)
    Failed,
}

impl ConnectionState {
    /// Whether no further automatic transition can happen.
    pub fn is_terminal(self) -> bool {
        self == Self::Failed
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Reconnecting => "reconnecting",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Mutable per-process session.
///
/// # Invariants
///
/// - `reconnect_attempts` only increases while `state` is
///   [`ConnectionState::Reconnecting`].
/// - `reconnect_attempts` is reset to 0 exactly on entering
///   [`ConnectionState::Connected`].
/// - `display_name` survives reconnects; it only changes when the user sets a
///   new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    display_name: Option<DisplayName>,
    state: ConnectionState,
    reconnect_attempts: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Fresh session: no name, [`ConnectionState::Disconnected`], no retries.
    pub fn new() -> Self {
        Self { display_name: None, state: ConnectionState::Disconnected, reconnect_attempts: 0 }
    }

    /// Fresh session that already carries a display name, e.g. one chosen on
    /// the command line or kept across a restart.
    pub fn with_display_name(name: DisplayName) -> Self {
        Self { display_name: Some(name), ..Self::new() }
    }

    /// Display name chosen by the user. `None` until one is set.
    pub fn display_name(&self) -> Option<&DisplayName> {
        self.display_name.as_ref()
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Consecutive reconnects attempted since the last successful open.
    pub fn reconnect_attempts(&self) -> u32 {
        self.reconnect_attempts
    }

    pub(crate) fn set_display_name(&mut self, name: DisplayName) {
        self.display_name = Some(name);
    }

    /// Move to `state`, applying the entry side effects on the counter.
    pub(crate) fn enter(&mut self, state: ConnectionState) {
        if state == ConnectionState::Connected {
            self.reconnect_attempts = 0;
        }
        self.state = state;
    }

    /// Count one more reconnect attempt.
    pub(crate) fn record_reconnect_attempt(&mut self) -> u32 {
        debug_assert_eq!(self.state, ConnectionState::Reconnecting);
        self.reconnect_attempts = self.reconnect_attempts.saturating_add(1);
        self.reconnect_attempts
    }
}
