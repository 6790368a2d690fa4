//! Application input events.
//!
//! This module defines [`AppEvent`], the inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (edits, submitted lines, resize) and ticks.
//! - Connection notifications forwarded by the runtime.

use relaychat_core::{ConnectionError, ConnectionStatus};
use relaychat_proto::InboundEvent;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// User submitted a line of input.
    Submit(String),

    /// Text in the input line changed; only a redraw is needed.
    InputEdited,

    /// Periodic tick.
    Tick,

    /// Terminal was resized.
    Resize,

    /// User asked to quit (e.g. Esc or Ctrl-C).
    QuitRequested,

    /// Decoded frame from the relay.
    Inbound(InboundEvent),

    /// Connection state or retry counter changed.
    Status(ConnectionStatus),

    /// Connection problem. Transient ones go to the status bar, the rest
    /// to the message log.
    Diagnostic(ConnectionError),
}
