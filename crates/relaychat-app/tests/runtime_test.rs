//! Runtime integration tests.
//!
//! Drives the generic [`Runtime`] with a scripted in-memory driver: the script
//! plays the part of the user, the transport and the reconnect timer, and the
//! driver records every side effect the runtime asks for.

use std::{collections::VecDeque, io, time::Duration};

use relaychat_app::{
    App, AppEvent, ConnectionConfig, ConnectionState, DisplayName, Driver, DriverEvent, LineKind,
    Runtime, TransportEvent,
};

#[derive(Debug, Default)]
struct ScriptedDriver {
    script: VecDeque<DriverEvent>,
    opened: Vec<String>,
    sent: Vec<String>,
    timers: Vec<Duration>,
    closes: usize,
    renders: usize,
    stopped: bool,
}

impl ScriptedDriver {
    fn new(script: impl IntoIterator<Item = DriverEvent>) -> Self {
        Self { script: script.into_iter().collect(), ..Self::default() }
    }
}

impl Driver for ScriptedDriver {
    type Error = io::Error;

    async fn poll_event(&mut self) -> Result<Option<DriverEvent>, Self::Error> {
        Ok(self.script.pop_front())
    }

    fn open(&mut self, url: &str) -> Result<(), Self::Error> {
        self.opened.push(url.to_string());
        Ok(())
    }

    async fn send(&mut self, frame: String) -> Result<(), Self::Error> {
        self.sent.push(frame);
        Ok(())
    }

    fn schedule_reconnect(&mut self, delay: Duration) {
        self.timers.push(delay);
    }

    fn close(&mut self) {
        self.closes += 1;
    }

    fn render(&mut self, _app: &App) -> Result<(), Self::Error> {
        self.renders += 1;
        Ok(())
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

const URL: &str = "ws://relay.test:8765";

fn config(max_reconnect_attempts: u32) -> ConnectionConfig {
    ConnectionConfig {
        url: URL.to_string(),
        max_reconnect_attempts,
        reconnect_delay: Duration::from_millis(3000),
    }
}

fn alice() -> Option<DisplayName> {
    Some(DisplayName::new("alice").unwrap())
}

fn opened() -> DriverEvent {
    DriverEvent::Transport(TransportEvent::Opened)
}

fn closed() -> DriverEvent {
    DriverEvent::Transport(TransportEvent::Closed)
}

fn frame(text: &str) -> DriverEvent {
    DriverEvent::Transport(TransportEvent::Message(text.to_string()))
}

fn submit(line: &str) -> DriverEvent {
    DriverEvent::App(AppEvent::Submit(line.to_string()))
}

async fn run(
    script: Vec<DriverEvent>,
    max: u32,
    name: Option<DisplayName>,
) -> Runtime<ScriptedDriver> {
    let mut runtime = Runtime::new(ScriptedDriver::new(script), config(max), name);
    runtime.run().await.unwrap();
    runtime
}

#[tokio::test]
async fn connects_on_start_and_stops_when_script_ends() {
    let runtime = run(vec![], 5, None).await;

    assert_eq!(runtime.driver().opened, vec![URL.to_string()]);
    assert!(runtime.driver().stopped);
    assert!(runtime.driver().renders >= 1);
    assert_eq!(runtime.connection().state(), ConnectionState::Connecting);
    assert_eq!(runtime.app().connection_label(), "Connecting...");
}

#[tokio::test]
async fn name_is_announced_first_after_open() {
    let runtime = run(vec![opened(), submit("hello")], 5, alice()).await;

    assert_eq!(runtime.driver().sent, vec!["/name alice".to_string(), "hello".to_string()]);
    assert_eq!(runtime.app().connection_label(), "Connected");
}

#[tokio::test]
async fn reconnect_reannounces_name() {
    let script = vec![opened(), closed(), DriverEvent::ReconnectDue, opened()];
    let runtime = run(script, 5, alice()).await;

    let driver = runtime.driver();
    assert_eq!(driver.opened.len(), 2);
    assert_eq!(driver.timers, vec![Duration::from_millis(3000)]);
    assert_eq!(driver.sent, vec!["/name alice".to_string(), "/name alice".to_string()]);
    assert_eq!(runtime.connection().reconnect_attempts(), 0);
}

#[tokio::test]
async fn status_shows_retry_progress() {
    let script = vec![opened(), closed()];
    let runtime = run(script, 5, None).await;

    assert_eq!(runtime.connection().state(), ConnectionState::Reconnecting);
    assert_eq!(runtime.app().connection_label(), "Reconnecting (1/5)...");
    assert_eq!(runtime.app().status_message(), Some("connection closed"));
}

#[tokio::test]
async fn gives_up_after_reconnect_cap() {
    let script = vec![
        closed(),
        DriverEvent::ReconnectDue,
        closed(),
        DriverEvent::ReconnectDue,
        closed(),
        // Nothing listens anymore.
        DriverEvent::ReconnectDue,
    ];
    let runtime = run(script, 2, None).await;

    let driver = runtime.driver();
    assert_eq!(driver.opened.len(), 3);
    assert_eq!(driver.timers.len(), 2);
    assert_eq!(runtime.connection().state(), ConnectionState::Failed);
    assert_eq!(runtime.app().connection_label(), "Could not reconnect");

    let last = runtime.app().messages().last().map(|line| (line.kind, line.text.as_str()));
    assert_eq!(
        last,
        Some((
            LineKind::Local,
            "Connection lost: could not reconnect after 2 attempts. Type /restart to try again."
        ))
    );
}

#[tokio::test]
async fn restart_after_failure_keeps_name() {
    let script = vec![closed(), submit("/restart"), opened()];
    let runtime = run(script, 0, alice()).await;

    let driver = runtime.driver();
    assert_eq!(driver.opened.len(), 2);
    assert_eq!(driver.closes, 1);
    assert_eq!(driver.sent, vec!["/name alice".to_string()]);
    assert_eq!(runtime.connection().state(), ConnectionState::Connected);
}

#[tokio::test]
async fn restart_is_refused_while_healthy() {
    let runtime = run(vec![opened(), submit("/restart")], 5, None).await;

    assert_eq!(runtime.driver().opened.len(), 1);
    assert_eq!(runtime.driver().closes, 0);
}

#[tokio::test]
async fn inbound_frames_reach_the_app_in_order() {
    let script = vec![opened(), frame("USERS:alice,bob"), frame("SYSTEM: bob joined"), frame("hi")];
    let runtime = run(script, 5, None).await;

    let app = runtime.app();
    assert_eq!(app.users(), ["alice".to_string(), "bob".to_string()]);
    let log: Vec<_> = app.messages().map(|line| (line.kind, line.text.as_str())).collect();
    assert_eq!(log, vec![(LineKind::System, "SYSTEM: bob joined"), (LineKind::Chat, "hi")]);
}

#[tokio::test]
async fn text_while_reconnecting_is_not_sent() {
    let runtime = run(vec![opened(), closed(), submit("hello")], 5, None).await;

    assert!(runtime.driver().sent.is_empty());
    assert_eq!(runtime.app().status_message(), Some("Not connected, message not sent"));
}

#[tokio::test]
async fn name_set_while_connected_is_sent_immediately() {
    let runtime = run(vec![opened(), submit("/name bob")], 5, None).await;

    assert_eq!(runtime.driver().sent, vec!["/name bob".to_string()]);
}

#[tokio::test]
async fn name_set_while_connecting_waits_for_open() {
    let runtime = run(vec![submit("/name bob"), opened()], 5, None).await;

    assert_eq!(runtime.driver().sent, vec!["/name bob".to_string()]);
}

#[tokio::test]
async fn quit_stops_processing() {
    let runtime = run(vec![submit("/quit"), opened()], 5, None).await;

    assert!(runtime.driver().stopped);
    assert_eq!(runtime.connection().state(), ConnectionState::Connecting);
}

#[tokio::test]
async fn transport_errors_do_not_change_state() {
    let script = vec![opened(), DriverEvent::Transport(TransportEvent::Error("reset".into()))];
    let runtime = run(script, 5, None).await;

    assert_eq!(runtime.connection().state(), ConnectionState::Connected);
    assert_eq!(runtime.app().status_message(), Some("connection error: reset"));
}
