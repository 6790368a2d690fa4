//! Connection lifecycle state machine.
//!
//! Owns the transport lifecycle: opening, closing, error observation, and a
//! bounded-retry reconnect policy with identity re-announcement. Uses the
//! action pattern: every input is an event, every output is a list of actions
//! for the driver to execute. The state machine never touches a socket or a
//! clock, which keeps it deterministic under test.
//!
//! # State Machine
//!
//! ```text
//!                 connect                 open
//! ┌──────────────┐──────>┌────────────┐───────>┌───────────┐
//! │ Disconnected │       │ Connecting │        │ Connected │
//! └──────────────┘       └────────────┘<──┐    └───────────┘
//!                              │          │          │
//!                              │ close    │ timer    │ close
//!                              ↓          │          ↓
//!                        ┌──────────────┐─┘          │
//!                        │ Reconnecting │<───────────┘
//!                        └──────────────┘
//!                              │ attempts >= max
//!                              ↓
//!                          ┌────────┐
//!                          │ Failed │
//!                          └────────┘
//! ```
//!
//! Transport errors never move the machine on their own. Only a close drives
//! reconnection, so an error followed by a close counts as one failure.

use std::time::Duration;

use relaychat_proto::{DisplayName, InboundEvent, OutboundCommand, decode, encode};

use crate::{
    error::ConnectionError,
    session::{ConnectionState, Session},
};

/// Number of consecutive automatic reconnects before giving up.
pub const DEFAULT_MAX_RECONNECT_ATTEMPTS: u32 = 5;

/// Fixed wait between a close and the next connect attempt.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_millis(3000);

/// Relay address used when none is configured.
pub const DEFAULT_RELAY_URL: &str = "ws://127.0.0.1:8765";

/// Actions returned by the connection state machine.
///
/// The driver executes these in order:
/// - `Open`: drop any current transport and open a new one
/// - `Send`: write one text frame on the current transport
/// - `ScheduleReconnect`: arm the reconnect timer
/// - `Deliver`, `Diagnostic`, `Exhausted`: hand to the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionAction {
    /// Open a fresh transport to this URL.
    Open {
        /// Relay URL
        url: String,
    },

    /// Send this text frame to the relay.
    Send(String),

    /// Feed [`ConnectionEvent::ReconnectTimerElapsed`] back after `delay`.
    ScheduleReconnect {
        /// Time to wait before reconnecting
        delay: Duration,
        /// 1-based attempt number this timer is for
        attempt: u32,
    },

    /// Decoded inbound event for the UI.
    Deliver(InboundEvent),

    /// Non-fatal failure the UI should show. The state machine recovers on
    /// its own.
    Diagnostic(ConnectionError),

    /// Reconnect cap reached. Terminal. Always carries
    /// [`ConnectionError::ReconnectExhausted`].
    Exhausted(ConnectionError),
}

/// Inputs to the connection state machine.
///
/// Transport callbacks, the reconnect timer and user intents all arrive as
/// events on one queue and are handled one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// Start connecting (initial connect, or user request).
    Connect,
    /// Transport reports a successful open.
    Opened,
    /// Transport reports closure, from any cause.
    Closed,
    /// Transport reports an error.
    Error {
        /// Transport-specific description
        diagnostic: String,
    },
    /// Transport delivered one text frame.
    Message(String),
    /// The timer armed by [`ConnectionAction::ScheduleReconnect`] fired.
    ReconnectTimerElapsed,
    /// User wants to broadcast a chat line.
    SendText(String),
    /// User chose a display name.
    SetName(DisplayName),
}

/// Connection configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Relay URL
    pub url: String,
    /// Consecutive reconnects allowed before giving up
    pub max_reconnect_attempts: u32,
    /// Wait between a close and the next attempt
    pub reconnect_delay: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RELAY_URL.to_string(),
            max_reconnect_attempts: DEFAULT_MAX_RECONNECT_ATTEMPTS,
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
        }
    }
}

impl ConnectionConfig {
    /// Default policy against the given relay.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), ..Self::default() }
    }
}

/// Snapshot of the connection for status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionStatus {
    /// Current state
    pub state: ConnectionState,
    /// Reconnects attempted since the last successful open
    pub reconnect_attempts: u32,
    /// Configured reconnect cap
    pub max_reconnect_attempts: u32,
}

/// Connection lifecycle state machine.
///
/// Sole owner of the [`Session`]. Pure: no I/O, no timers, no clock.
#[derive(Debug, Clone)]
pub struct ConnectionManager {
    session: Session,
    config: ConnectionConfig,
}

impl ConnectionManager {
    /// Create a manager in [`ConnectionState::Disconnected`] with an empty
    /// session.
    pub fn new(config: ConnectionConfig) -> Self {
        Self::with_session(config, Session::new())
    }

    /// Create a manager around an existing session.
    ///
    /// Used to start with a name chosen up front, or to carry the name over
    /// when the UI restarts the client after a failure.
    pub fn with_session(config: ConnectionConfig, session: Session) -> Self {
        Self { session, config }
    }

    /// Current connection state
    pub fn state(&self) -> ConnectionState {
        self.session.state()
    }

    /// The owned session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Active configuration.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Reconnects attempted since the last successful open.
    pub fn reconnect_attempts(&self) -> u32 {
        self.session.reconnect_attempts()
    }

    /// State and retry counter for the UI.
    pub fn status(&self) -> ConnectionStatus {
        ConnectionStatus {
            state: self.session.state(),
            reconnect_attempts: self.session.reconnect_attempts(),
            max_reconnect_attempts: self.config.max_reconnect_attempts,
        }
    }

    /// Start connecting. No-op while connecting, connected or failed.
    pub fn connect(&mut self) -> Vec<ConnectionAction> {
        self.handle(ConnectionEvent::Connect)
    }

    /// Transport opened.
    pub fn handle_open(&mut self) -> Vec<ConnectionAction> {
        self.handle(ConnectionEvent::Opened)
    }

    /// Transport closed.
    pub fn handle_close(&mut self) -> Vec<ConnectionAction> {
        self.handle(ConnectionEvent::Closed)
    }

    /// Transport reported an error. Never changes state.
    pub fn handle_error(&mut self, diagnostic: impl Into<String>) -> Vec<ConnectionAction> {
        self.handle(ConnectionEvent::Error { diagnostic: diagnostic.into() })
    }

    /// Transport delivered a frame.
    pub fn handle_message(&mut self, frame: impl Into<String>) -> Vec<ConnectionAction> {
        self.handle(ConnectionEvent::Message(frame.into()))
    }

    /// Reconnect timer fired.
    pub fn handle_reconnect_timer(&mut self) -> Vec<ConnectionAction> {
        self.handle(ConnectionEvent::ReconnectTimerElapsed)
    }

    /// Broadcast a chat line. Dropped unless connected; there is no outbound
    /// queue.
    pub fn send_text(&mut self, text: impl Into<String>) -> Vec<ConnectionAction> {
        self.handle(ConnectionEvent::SendText(text.into()))
    }

    /// Record the display name and announce it if connected.
    ///
    /// The name is kept either way and announced on every later successful
    /// open.
    pub fn set_name(&mut self, name: DisplayName) -> Vec<ConnectionAction> {
        self.handle(ConnectionEvent::SetName(name))
    }

    /// Process one event and return the actions it produces.
    ///
    /// Events that make no sense in the current state (an open while not
    /// connecting, a timer while not reconnecting) are logged and ignored.
    pub fn handle(&mut self, event: ConnectionEvent) -> Vec<ConnectionAction> {
        use ConnectionState as S;

        match (self.session.state(), event) {
            (S::Disconnected | S::Reconnecting, ConnectionEvent::Connect)
            | (S::Reconnecting, ConnectionEvent::ReconnectTimerElapsed) => self.begin_connect(),

            (state @ (S::Connecting | S::Connected), ConnectionEvent::Connect) => {
                tracing::debug!("connect ignored, already {state}");
                vec![]
            },

            (S::Failed, ConnectionEvent::Connect) => {
                tracing::warn!("connect ignored, session failed and needs a restart");
                vec![]
            },

            (S::Connecting, ConnectionEvent::Opened) => self.complete_open(),

            (S::Connecting | S::Connected, ConnectionEvent::Closed) => self.handle_closed(),

            (state, ConnectionEvent::Error { diagnostic }) => {
                tracing::warn!(%state, "transport error: {diagnostic}");
                let error = if state == S::Connecting {
                    ConnectionError::TransportOpenFailure { diagnostic }
                } else {
                    ConnectionError::TransportFault { diagnostic }
                };
                vec![ConnectionAction::Diagnostic(error)]
            },

            (S::Connected, ConnectionEvent::Message(frame)) => {
                vec![ConnectionAction::Deliver(decode(&frame))]
            },

            (state, ConnectionEvent::Message(frame)) => {
                tracing::debug!(%state, len = frame.len(), "dropping frame, not connected");
                vec![]
            },

            (S::Connected, ConnectionEvent::SendText(text)) => {
                vec![ConnectionAction::Send(encode(&OutboundCommand::send_text(text)))]
            },

            (state, ConnectionEvent::SendText(_)) => {
                tracing::debug!(%state, "chat line not sent, not connected");
                vec![]
            },

            (state, ConnectionEvent::SetName(name)) => {
                tracing::info!(name = %name, "display name set");
                let frame = encode(&OutboundCommand::set_name(&name));
                self.session.set_display_name(name);
                if state == S::Connected { vec![ConnectionAction::Send(frame)] } else { vec![] }
            },

            (
                state,
                event @ (ConnectionEvent::Opened
                | ConnectionEvent::Closed
                | ConnectionEvent::ReconnectTimerElapsed),
            ) => {
                tracing::warn!("ignoring {event:?} in state {state}");
                vec![]
            },
        }
    }

    /// Enter `Connecting` and ask the driver to open a transport.
    fn begin_connect(&mut self) -> Vec<ConnectionAction> {
        self.session.enter(ConnectionState::Connecting);
        tracing::info!(
            url = %self.config.url,
            attempt = self.session.reconnect_attempts(),
            "connecting"
        );
        vec![ConnectionAction::Open { url: self.config.url.clone() }]
    }

    /// Enter `Connected` and re-announce the display name, if any.
    fn complete_open(&mut self) -> Vec<ConnectionAction> {
        self.session.enter(ConnectionState::Connected);
        tracing::info!(url = %self.config.url, "connected");

        self.session
            .display_name()
            .map(|name| ConnectionAction::Send(encode(&OutboundCommand::set_name(name))))
            .into_iter()
            .collect()
    }

    /// Enter `Reconnecting`, then either arm the timer or give up.
    fn handle_closed(&mut self) -> Vec<ConnectionAction> {
        self.session.enter(ConnectionState::Reconnecting);

        let mut actions = vec![ConnectionAction::Diagnostic(ConnectionError::TransportClosed)];
        let attempts = self.session.reconnect_attempts();

        if attempts < self.config.max_reconnect_attempts {
            let attempt = self.session.record_reconnect_attempt();
            tracing::info!(
                attempt,
                max = self.config.max_reconnect_attempts,
                delay = ?self.config.reconnect_delay,
                "connection closed, scheduling reconnect"
            );
            actions.push(ConnectionAction::ScheduleReconnect {
                delay: self.config.reconnect_delay,
                attempt,
            });
        } else {
            self.session.enter(ConnectionState::Failed);
            tracing::error!(attempts, "connection closed, reconnect attempts exhausted");
            actions.push(ConnectionAction::Exhausted(ConnectionError::ReconnectExhausted {
                attempts,
            }));
        }

        actions
    }
}
