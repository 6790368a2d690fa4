//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the interactive
//! state of the client completely decoupled from I/O and connection mechanics.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Interprets submitted input lines (see [`crate::Command`]).
//! - Keeps the online user list and a bounded message log.
//! - Tracks connection status and a transient status message for feedback.

use std::collections::VecDeque;

use relaychat_core::{ConnectionConfig, ConnectionState, ConnectionStatus};
use relaychat_proto::{DisplayName, InboundEvent, MAX_FRAME_CHARS, OutboundCommand};

use crate::{
    AppAction, AppEvent, ChatLine, LineKind,
    command::{self, Command},
};

/// Message log length. Older lines are discarded.
pub const MAX_HISTORY: usize = 1000;

const RESTART_HINT: &str = "Type /restart to try again.";

const HELP: &[&str] = &[
    "/name <name>   choose a display name",
    "/restart       reconnect after the connection has failed",
    "/quit          exit",
    "anything else is sent to the relay as typed",
];

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable without a terminal or a relay.
#[derive(Debug, Clone)]
pub struct App {
    /// Relay URL, for display.
    relay_url: String,
    /// Last connection snapshot reported by the runtime.
    status: ConnectionStatus,
    /// Name chosen by the user. `None` until `/name` or `--name`.
    display_name: Option<DisplayName>,
    /// Online users from the last `USERS:` frame.
    users: Vec<String>,
    /// Message log, oldest first.
    messages: VecDeque<ChatLine>,
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create a new App for the relay and reconnect cap in `config`.
    pub fn new(config: &ConnectionConfig, display_name: Option<DisplayName>) -> Self {
        Self {
            relay_url: config.url.clone(),
            status: ConnectionStatus {
                state: ConnectionState::Disconnected,
                reconnect_attempts: 0,
                max_reconnect_attempts: config.max_reconnect_attempts,
            },
            display_name,
            users: Vec::new(),
            messages: VecDeque::new(),
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Tick => vec![],
            AppEvent::InputEdited | AppEvent::Resize => vec![AppAction::Render],
            AppEvent::QuitRequested => vec![AppAction::Quit],
            AppEvent::Submit(line) => self.submit(&line),
            AppEvent::Inbound(inbound) => {
                self.receive(inbound);
                vec![AppAction::Render]
            },
            AppEvent::Status(status) => {
                if status.state == ConnectionState::Connected {
                    self.status_message = None;
                }
                self.status = status;
                vec![AppAction::Render]
            },
            AppEvent::Diagnostic(error) if error.is_transient() => {
                self.status_message = Some(error.to_string());
                vec![AppAction::Render]
            },
            AppEvent::Diagnostic(error) => {
                self.users.clear();
                self.push_line(ChatLine::new(
                    LineKind::Local,
                    format!("Connection lost: {error}. {RESTART_HINT}"),
                ));
                vec![AppAction::Render]
            },
        }
    }

    /// Interpret one submitted input line.
    fn submit(&mut self, line: &str) -> Vec<AppAction> {
        match command::parse(line) {
            Command::Empty => vec![],
            Command::Quit => vec![AppAction::Quit],
            Command::Help => {
                for line in HELP {
                    self.push_line(ChatLine::new(LineKind::Local, *line));
                }
                vec![AppAction::Render]
            },
            Command::SetName(name) => {
                self.status_message = Some(format!("Name set to {name}"));
                self.display_name = Some(name.clone());
                vec![AppAction::SetName(name), AppAction::Render]
            },
            Command::InvalidName(error) => {
                self.status_message = Some(format!("/name: {error}"));
                vec![AppAction::Render]
            },
            Command::Restart => {
                if self.status.state.is_terminal() {
                    self.status_message = Some("Restarting...".to_string());
                    vec![AppAction::Restart, AppAction::Render]
                } else {
                    self.status_message =
                        Some("Nothing to restart, the client reconnects on its own".to_string());
                    vec![AppAction::Render]
                }
            },
            Command::Text(text) => self.send_text(text),
        }
    }

    /// Send a chat line if the relay would take it.
    fn send_text(&mut self, text: String) -> Vec<AppAction> {
        if self.status.state != ConnectionState::Connected {
            self.status_message = Some("Not connected, message not sent".to_string());
            return vec![AppAction::Render];
        }

        if OutboundCommand::send_text(text.as_str()).exceeds_relay_limit() {
            self.status_message = Some(format!(
                "Message too long, the relay drops lines over {MAX_FRAME_CHARS} characters"
            ));
            return vec![AppAction::Render];
        }

        vec![AppAction::SendText(text), AppAction::Render]
    }

    /// Fold one inbound event into the view.
    fn receive(&mut self, inbound: InboundEvent) {
        match inbound {
            InboundEvent::UserListUpdated { users } => self.users = users,
            InboundEvent::SystemNotice { text } => {
                self.push_line(ChatLine::new(LineKind::System, text));
            },
            InboundEvent::PrivateMessage { text } => {
                self.push_line(ChatLine::new(LineKind::Private, text));
            },
            InboundEvent::ChatMessage { text } => {
                self.push_line(ChatLine::new(LineKind::Chat, text));
            },
        }
    }

    fn push_line(&mut self, line: ChatLine) {
        if self.messages.len() >= MAX_HISTORY {
            self.messages.pop_front();
        }
        self.messages.push_back(line);
    }

    /// Human-readable connection status for the status bar.
    pub fn connection_label(&self) -> String {
        let ConnectionStatus { state, reconnect_attempts, max_reconnect_attempts } = self.status;
        match state {
            ConnectionState::Disconnected => "Disconnected".to_string(),
            ConnectionState::Connecting if reconnect_attempts == 0 => "Connecting...".to_string(),
            ConnectionState::Connecting | ConnectionState::Reconnecting => {
                format!("Reconnecting ({reconnect_attempts}/{max_reconnect_attempts})...")
            },
            ConnectionState::Connected => "Connected".to_string(),
            ConnectionState::Failed => "Could not reconnect".to_string(),
        }
    }

    /// Last connection snapshot.
    pub fn connection_status(&self) -> ConnectionStatus {
        self.status
    }

    /// Relay URL.
    pub fn relay_url(&self) -> &str {
        &self.relay_url
    }

    /// Display name chosen by the user, if any.
    pub fn display_name(&self) -> Option<&DisplayName> {
        self.display_name.as_ref()
    }

    /// Users currently online, as last reported by the relay.
    pub fn users(&self) -> &[String] {
        &self.users
    }

    /// Message log, oldest first.
    pub fn messages(&self) -> impl ExactSizeIterator<Item = &ChatLine> {
        self.messages.iter()
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
