//! Transport notifications.

/// Notifications a transport delivers, in order, for one connection attempt.
///
/// A successful attempt yields `Opened`, any number of `Message`s and `Error`s,
/// then exactly one `Closed`. A failed attempt yields `Error` then `Closed`
/// without `Opened`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Connection established.
    Opened,

    /// One complete text frame from the relay.
    Message(String),

    /// Something went wrong. Informational: a `Closed` follows if the
    /// connection is gone.
    Error(String),

    /// Connection is gone, for any reason.
    Closed,
}
