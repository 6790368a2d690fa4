//! Inbound events decoded from relay frames.

/// One classified inbound frame.
///
/// Produced by [`crate::decode`] for every frame and handed straight to the
/// UI; nothing in the protocol layer keeps it around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// The relay's current list of online users, in relay order.
    UserListUpdated {
        /// User names. Empty when nobody is registered.
        users: Vec<String>,
    },

    /// Relay notice. `text` is the full frame, prefix included.
    SystemNotice {
        /// Full frame text.
        text: String,
    },

    /// Private message. `text` is the full frame, prefix included.
    PrivateMessage {
        /// Full frame text.
        text: String,
    },

    /// Public chat line.
    ChatMessage {
        /// Full frame text.
        text: String,
    },
}

impl InboundEvent {
    /// Display text of the event. `None` for user list updates, which replace
    /// the roster instead of adding a line to the log.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::UserListUpdated { .. } => None,
            Self::SystemNotice { text }
            | Self::PrivateMessage { text }
            | Self::ChatMessage { text } => Some(text),
        }
    }
}
