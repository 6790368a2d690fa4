//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. The relay connection uses the
//! WebSocket transport from `relaychat-client`.

use std::{
    future,
    io::{self, Stdout, stdout},
    time::Duration,
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use relaychat_app::{App, AppEvent, Driver, DriverEvent, TransportEvent};
use relaychat_client::{
    TransportError,
    transport::{self, ConnectedClient, TransportConfig},
};
use thiserror::Error;
use tokio::time::Instant;

use crate::{InputState, KeyInput, ui};

/// Redraw interval when nothing else happens.
const TICK: Duration = Duration::from_millis(250);

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Terminal event stream ended unexpectedly.
    #[error("terminal event stream closed")]
    EventStreamClosed,
}

/// What woke the driver up.
enum Wake {
    Terminal(Option<io::Result<Event>>),
    Transport(Option<TransportEvent>),
    ReconnectDue,
    Tick,
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm), rendering (ratatui), the relay
/// connection and the reconnect timer. Owns the input state for text editing.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    connection: Option<ConnectedClient>,
    reconnect_at: Option<Instant>,
    transport_config: TransportConfig,
    input_state: InputState,
}

impl TerminalDriver {
    /// Take over the terminal: raw mode plus the alternate screen.
    pub fn new(transport_config: TransportConfig) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self {
            terminal,
            event_stream,
            connection: None,
            reconnect_at: None,
            transport_config,
            input_state: InputState::new(),
        })
    }

    /// Convert a crossterm key event to `KeyInput`.
    fn convert_key(key: KeyEvent) -> Option<KeyInput> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(key.code, KeyCode::Char('c' | 'd')).then_some(KeyInput::Esc);
        }

        match key.code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Delete => Some(KeyInput::Delete),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            _ => None,
        }
    }

    /// Turn a terminal event into an App event. Unhandled input is a tick.
    fn terminal_event(&mut self, event: Event) -> AppEvent {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Self::convert_key(key)
                .and_then(|key| self.input_state.handle_key(key))
                .unwrap_or(AppEvent::Tick),
            Event::Resize(..) => AppEvent::Resize,
            _ => AppEvent::Tick,
        }
    }
}

/// Next event from the current transport, or never if there is none.
async fn next_transport_event(connection: Option<&mut ConnectedClient>) -> Option<TransportEvent> {
    match connection {
        Some(connection) => connection.next_event().await,
        None => future::pending().await,
    }
}

/// Fires at `at`, or never if no timer is armed.
async fn reconnect_timer(at: Option<Instant>) {
    match at {
        Some(at) => tokio::time::sleep_until(at).await,
        None => future::pending().await,
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<DriverEvent>, Self::Error> {
        let wake = tokio::select! {
            biased;

            maybe_event = self.event_stream.next() => Wake::Terminal(maybe_event),
            event = next_transport_event(self.connection.as_mut()) => Wake::Transport(event),
            () = reconnect_timer(self.reconnect_at) => Wake::ReconnectDue,
            () = tokio::time::sleep(TICK) => Wake::Tick,
        };

        let event = match wake {
            Wake::Terminal(Some(Ok(event))) => DriverEvent::App(self.terminal_event(event)),
            Wake::Terminal(Some(Err(e))) => return Err(TerminalError::Io(e)),
            Wake::Terminal(None) => return Err(TerminalError::EventStreamClosed),
            Wake::Transport(Some(event)) => DriverEvent::Transport(event),
            Wake::Transport(None) => {
                // Task gone without a Closed event; only happens after stop().
                self.connection = None;
                DriverEvent::App(AppEvent::Tick)
            },
            Wake::ReconnectDue => {
                self.reconnect_at = None;
                DriverEvent::ReconnectDue
            },
            Wake::Tick => DriverEvent::App(AppEvent::Tick),
        };

        Ok(Some(event))
    }

    fn open(&mut self, url: &str) -> Result<(), Self::Error> {
        tracing::debug!(%url, "opening transport");
        self.connection = Some(transport::open_with_config(url, self.transport_config.clone()));
        Ok(())
    }

    async fn send(&mut self, frame: String) -> Result<(), Self::Error> {
        let Some(connection) = &self.connection else {
            tracing::debug!("no transport, frame dropped");
            return Ok(());
        };

        match connection.send(frame).await {
            Ok(()) => {},
            Err(TransportError::Closed) => tracing::debug!("transport closed, frame dropped"),
            Err(e) => tracing::warn!("send failed: {e}"),
        }
        Ok(())
    }

    fn schedule_reconnect(&mut self, delay: Duration) {
        self.reconnect_at = Some(Instant::now() + delay);
    }

    fn close(&mut self) {
        self.connection = None;
        self.reconnect_at = None;
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| {
            ui::render(frame, app, &self.input_state);
        })?;
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.stop();
        }
        self.reconnect_at = None;
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
