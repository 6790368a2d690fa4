//! WebSocket transport for the client.
//!
//! Provides [`ConnectedClient`], a handle to one connection attempt. A spawned
//! task owns the socket and bridges it to two channels: outbound text frames
//! in, [`TransportEvent`]s out. This is a thin layer that only moves frames;
//! reconnect policy and protocol logic stay in the sans-IO state machine.
//!
//! The event channel is unbounded. The relay echoes every line back to its
//! sender, so a bounded event queue lets a burst of sends stall the bridge
//! while the caller is still sending and never reading.
//!
//! Every attempt ends with exactly one [`TransportEvent::Closed`]. A failed
//! handshake is reported as [`TransportEvent::Error`] followed by `Closed`,
//! never as `Opened`.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::{sync::mpsc, task::AbortHandle};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::{TransportError, TransportEvent};

/// Transport configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// How long the TCP connect plus WebSocket handshake may take.
    pub connect_timeout: Duration,
    /// Buffered outbound frames before [`ConnectedClient::send`] waits.
    pub channel_capacity: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self { connect_timeout: Duration::from_secs(10), channel_capacity: 64 }
    }
}

impl TransportConfig {
    /// Short timeouts for local relays and tests.
    pub fn development() -> Self {
        Self { connect_timeout: Duration::from_secs(1), ..Self::default() }
    }
}

/// Handle to one WebSocket connection attempt.
///
/// Dropping the handle aborts the connection task. Events still buffered in
/// the channel are discarded with it, so a replaced connection can never
/// report into the state machine.
#[derive(Debug)]
pub struct ConnectedClient {
    to_server: mpsc::Sender<String>,
    events: mpsc::UnboundedReceiver<TransportEvent>,
    abort_handle: AbortHandle,
}

impl ConnectedClient {
    /// Queue a text frame for the relay.
    ///
    /// Fails with [`TransportError::Closed`] once the connection task has
    /// finished.
    pub async fn send(&self, frame: String) -> Result<(), TransportError> {
        self.to_server.send(frame).await.map_err(|_| TransportError::Closed)
    }

    /// Next transport notification, or `None` once the task is gone and
    /// every buffered event has been read.
    ///
    /// Cancel safe.
    pub async fn next_event(&mut self) -> Option<TransportEvent> {
        self.events.recv().await
    }

    /// Stop the connection task. No further events are produced.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

impl Drop for ConnectedClient {
    fn drop(&mut self) {
        self.abort_handle.abort();
    }
}

/// Start connecting to a relay.
///
/// Returns immediately; the outcome of the handshake arrives as the first
/// event. Must be called from within a tokio runtime.
pub fn open_with_config(url: impl Into<String>, config: TransportConfig) -> ConnectedClient {
    let url = url.into();
    let capacity = config.channel_capacity.max(1);

    let (to_server_tx, to_server_rx) = mpsc::channel::<String>(capacity);
    let (events_tx, events_rx) = mpsc::unbounded_channel::<TransportEvent>();

    let handle = tokio::spawn(run_connection(url, config.connect_timeout, to_server_rx, events_tx));

    ConnectedClient {
        to_server: to_server_tx,
        events: events_rx,
        abort_handle: handle.abort_handle(),
    }
}

/// Run one connection attempt to completion, then report `Closed`.
async fn run_connection(
    url: String,
    connect_timeout: Duration,
    mut to_server: mpsc::Receiver<String>,
    events: mpsc::UnboundedSender<TransportEvent>,
) {
    if let Err(e) = bridge(&url, connect_timeout, &mut to_server, &events).await {
        tracing::warn!(%url, "transport failed: {e}");
        let _ = events.send(TransportEvent::Error(e.to_string()));
    }

    tracing::debug!(%url, "transport closed");
    let _ = events.send(TransportEvent::Closed);
}

/// Connect, then forward frames both ways until either side goes away.
async fn bridge(
    url: &str,
    connect_timeout: Duration,
    to_server: &mut mpsc::Receiver<String>,
    events: &mpsc::UnboundedSender<TransportEvent>,
) -> Result<(), TransportError> {
    let (stream, _response) = tokio::time::timeout(connect_timeout, connect_async(url))
        .await
        .map_err(|_| TransportError::Timeout(connect_timeout))?
        .map_err(|e| TransportError::Connection(e.to_string()))?;

    tracing::debug!(%url, "websocket handshake complete");
    events.send(TransportEvent::Opened).map_err(|_| TransportError::Closed)?;

    let (mut sink, mut source) = stream.split();

    loop {
        tokio::select! {
            outbound = to_server.recv() => match outbound {
                Some(frame) => {
                    sink.send(Message::Text(frame.into()))
                        .await
                        .map_err(|e| TransportError::Stream(e.to_string()))?;
                },
                None => {
                    // Handle dropped; say goodbye properly.
                    let _ = sink.close().await;
                    return Ok(());
                },
            },

            inbound = source.next() => match inbound {
                Some(Ok(Message::Text(text))) => {
                    events
                        .send(TransportEvent::Message(text.as_str().to_owned()))
                        .map_err(|_| TransportError::Closed)?;
                },
                Some(Ok(Message::Close(frame))) => {
                    tracing::debug!(?frame, "relay closed the connection");
                    let _ = sink.close().await;
                    return Ok(());
                },
                Some(Ok(other)) => {
                    // Binary is not part of the protocol; ping/pong are
                    // answered by tungstenite.
                    tracing::trace!(len = other.len(), "ignoring non-text frame");
                },
                Some(Err(e)) => return Err(TransportError::Stream(e.to_string())),
                None => return Ok(()),
            },
        }
    }
}
