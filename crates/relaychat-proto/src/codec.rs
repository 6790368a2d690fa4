//! Frame classification and command serialization.
//!
//! Both directions are total: every text frame decodes to exactly one
//! [`InboundEvent`], and every [`OutboundCommand`] encodes to exactly one
//! frame. Prefix precedence is part of the wire contract with the relay and
//! must not be reordered.

use crate::{InboundEvent, OutboundCommand};

/// Prefix of the online user list broadcast.
pub const USERS_PREFIX: &str = "USERS:";

/// Prefix of relay notices (joins, leaves, greetings).
pub const SYSTEM_PREFIX: &str = "SYSTEM:";

/// Prefix of private messages. The rest of the format is opaque to the codec.
pub const PRIVATE_PREFIX: &str = "[Privado";

/// Prefix of the name registration command.
pub const SET_NAME_PREFIX: &str = "/name ";

/// Longest frame, in characters, the relay accepts. Longer frames are dropped
/// by the relay without any reply.
pub const MAX_FRAME_CHARS: usize = 1000;

/// Classify one inbound text frame.
///
/// First match wins, in this order: `USERS:`, `SYSTEM:`, `[Privado`, anything
/// else. Only the user list has its prefix stripped; the other variants carry
/// the full frame because that is what gets displayed.
pub fn decode(frame: &str) -> InboundEvent {
    if let Some(csv) = frame.strip_prefix(USERS_PREFIX) {
        let users =
            if csv.is_empty() { Vec::new() } else { csv.split(',').map(str::to_owned).collect() };
        return InboundEvent::UserListUpdated { users };
    }

    if frame.starts_with(SYSTEM_PREFIX) {
        return InboundEvent::SystemNotice { text: frame.to_owned() };
    }

    if frame.starts_with(PRIVATE_PREFIX) {
        return InboundEvent::PrivateMessage { text: frame.to_owned() };
    }

    InboundEvent::ChatMessage { text: frame.to_owned() }
}

/// Serialize one outbound command into a text frame.
///
/// Chat text goes out verbatim: no prefix, no escaping.
pub fn encode(command: &OutboundCommand) -> String {
    match command {
        OutboundCommand::SetName { name } => format!("{SET_NAME_PREFIX}{name}"),
        OutboundCommand::SendText { text } => text.clone(),
    }
}
