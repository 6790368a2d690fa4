//! Error types for the protocol layer.
//!
//! Decoding and encoding are total, so the only failure here is local
//! validation of a display name before it is ever put on the wire.

use thiserror::Error;

/// A display name the relay would not register.
///
/// Raised by [`crate::DisplayName::new`] and never sent over the wire. The
/// relay ignores bad `/name` commands without replying, so rejecting them
/// locally is the only way the user gets feedback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidNameError {
    /// Name is empty after trimming whitespace.
    #[error("display name is empty")]
    Empty,

    /// Name is longer than the relay accepts.
    #[error("display name is {len} characters long, the relay accepts at most {max}")]
    TooLong {
        /// Length of the trimmed name in characters.
        len: usize,
        /// Relay limit.
        max: usize,
    },

    /// Name contains `:`, which the relay reserves for message prefixes.
    #[error("display name must not contain ':'")]
    ContainsColon,
}
