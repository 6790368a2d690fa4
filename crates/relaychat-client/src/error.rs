//! Transport errors.

use thiserror::Error;

/// Transport errors.
///
/// Inside the transport these end up as [`crate::TransportEvent::Error`]
/// diagnostics; they are only returned directly by the send path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection could not be established.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Opening handshake did not finish in time.
    #[error("connection timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Established connection failed.
    #[error("stream error: {0}")]
    Stream(String),

    /// Connection task has stopped; nothing can be sent.
    #[error("transport closed")]
    Closed,
}
