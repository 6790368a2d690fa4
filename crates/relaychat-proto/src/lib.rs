//! Relay chat wire protocol.
//!
//! The relay speaks plain text over a persistent stream, one message per
//! transport frame. There is no binary framing, no message IDs and no
//! acknowledgements. This crate classifies inbound frames into
//! [`InboundEvent`]s and serializes outbound [`OutboundCommand`]s.
//!
//! # Wire grammar
//!
//! ```text
//! outbound  /name <name>        register or re-register the display name
//!           <anything else>     broadcast chat line
//!
//! inbound   USERS:<a,b,c>       online user list
//!           SYSTEM:<text>       relay notice
//!           [Privado...         private message
//!           <anything else>     public chat line
//! ```
//!
//! Classification is by literal prefix, so a chat line typed by a user that
//! happens to start with `SYSTEM:` or `USERS:` is classified as a notice or a
//! user list. Other clients of the same relay behave the same way.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod codec;
mod command;
pub mod errors;
mod event;
mod name;

pub use codec::{
    MAX_FRAME_CHARS, PRIVATE_PREFIX, SET_NAME_PREFIX, SYSTEM_PREFIX, USERS_PREFIX, decode, encode,
};
pub use command::OutboundCommand;
pub use errors::InvalidNameError;
pub use event::InboundEvent;
pub use name::{DisplayName, MAX_NAME_CHARS};
