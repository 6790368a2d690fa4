//! Error types for the connection lifecycle.
//!
//! Transport failures never escape the state machine as `Err`: they are
//! turned into transitions plus a [`ConnectionError`] carried by a
//! [`crate::ConnectionAction`] so the UI can show what happened. Only
//! [`ConnectionError::ReconnectExhausted`] is unrecoverable.

use thiserror::Error;

/// Failures observed by the connection state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// Transport reported an error while opening. Retrying is driven by the
    /// close that follows, not by this error.
    #[error("failed to open connection: {diagnostic}")]
    TransportOpenFailure {
        /// Transport-specific description.
        diagnostic: String,
    },

    /// Transport reported an error on an open connection.
    #[error("connection error: {diagnostic}")]
    TransportFault {
        /// Transport-specific description.
        diagnostic: String,
    },

    /// Transport closed, for any reason.
    #[error("connection closed")]
    TransportClosed,

    /// Reconnect cap reached. The session will not recover on its own.
    #[error("could not reconnect after {attempts} attempts")]
    ReconnectExhausted {
        /// Number of reconnects attempted.
        attempts: u32,
    },
}

impl ConnectionError {
    /// Returns true if the state machine recovers from this error on its own.
    ///
    /// Transport errors and closures are retried up to the reconnect cap.
    /// Exhaustion is terminal and needs a restart from the UI.
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::ReconnectExhausted { .. })
    }
}
