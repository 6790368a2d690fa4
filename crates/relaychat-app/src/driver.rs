//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::{future::Future, time::Duration};

use relaychat_client::TransportEvent;

use crate::{App, AppEvent};

/// Everything that can wake the runtime up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverEvent {
    /// User input, resize or tick.
    App(AppEvent),
    /// Notification from the current transport.
    Transport(TransportEvent),
    /// The timer armed by [`Driver::schedule_reconnect`] fired.
    ReconnectDue,
}

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the terminal client and in tests.
///
/// # Implementations
///
/// - **TUI**: crossterm for terminal events, tokio-tungstenite for the relay
/// - **Tests**: a scripted queue of events with recorded side effects
///
/// # Contract
///
/// - At most one transport exists. [`open`](Driver::open) replaces it and the
///   replaced transport's pending events are never delivered.
/// - At most one reconnect timer is armed. Arming it again replaces it, and
///   [`close`](Driver::close) disarms it.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next event.
    ///
    /// Returns `None` when no more events will ever arrive, which ends the
    /// runtime.
    fn poll_event(
        &mut self,
    ) -> impl Future<Output = Result<Option<DriverEvent>, Self::Error>> + Send;

    /// Open a new transport to `url`, dropping the current one.
    ///
    /// The outcome is reported later through [`DriverEvent::Transport`].
    fn open(&mut self, url: &str) -> Result<(), Self::Error>;

    /// Send one text frame on the current transport.
    ///
    /// A transport that has already gone away is not an error: its `Closed`
    /// event is on its way.
    fn send(&mut self, frame: String) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Arm the reconnect timer.
    fn schedule_reconnect(&mut self, delay: Duration);

    /// Drop the current transport and disarm the reconnect timer.
    fn close(&mut self);

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Stop all I/O and clean up resources.
    fn stop(&mut self);
}
