//! Observable application state types.
//!
//! These are the view model: what the UI renders, without any of the
//! connection machinery behind it.

/// Where a line in the message log came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Public chat line from the relay.
    Chat,
    /// Private message from the relay.
    Private,
    /// Relay notice.
    System,
    /// Produced locally by the client, never sent or received.
    Local,
}

/// One line in the message log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    /// Origin of the line.
    pub kind: LineKind,
    /// Text as displayed.
    pub text: String,
}

impl ChatLine {
    /// Create a line.
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }
}
