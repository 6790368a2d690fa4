//! Outbound commands produced by user actions.

use crate::{DisplayName, MAX_FRAME_CHARS, encode};

/// One user action destined for the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundCommand {
    /// Register or re-register the display name.
    SetName {
        /// Name to announce. Never empty once it has gone through
        /// [`DisplayName`].
        name: String,
    },

    /// Broadcast a chat line.
    SendText {
        /// Text sent verbatim.
        text: String,
    },
}

impl OutboundCommand {
    /// Name registration for a validated display name.
    pub fn set_name(name: &DisplayName) -> Self {
        Self::SetName { name: name.as_str().to_owned() }
    }

    /// Chat line.
    pub fn send_text(text: impl Into<String>) -> Self {
        Self::SendText { text: text.into() }
    }

    /// Whether the relay would silently drop the encoded frame for being
    /// longer than [`MAX_FRAME_CHARS`].
    pub fn exceeds_relay_limit(&self) -> bool {
        encode(self).chars().count() > MAX_FRAME_CHARS
    }
}
