//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`ConnectionManager`]: connection lifecycle state machine
//! - [`Driver`]: Platform-specific I/O
//!
//! Events are processed one at a time, to completion. Actions produced by
//! either state machine go through a single queue, so an inbound frame that
//! makes the App emit more actions is handled within the same cycle.

use std::collections::VecDeque;

use relaychat_client::TransportEvent;
use relaychat_core::{
    ConnectionAction, ConnectionConfig, ConnectionManager, ConnectionStatus, Session,
};
use relaychat_proto::DisplayName;

use crate::{App, AppAction, AppEvent, Driver, DriverEvent};

/// One unit of pending work.
#[derive(Debug)]
enum Step {
    App(AppAction),
    Connection(ConnectionAction),
}

fn app_steps(actions: Vec<AppAction>) -> impl Iterator<Item = Step> {
    actions.into_iter().map(Step::App)
}

fn connection_steps(actions: Vec<ConnectionAction>) -> impl Iterator<Item = Step> {
    actions.into_iter().map(Step::Connection)
}

/// Generic runtime that orchestrates App, ConnectionManager and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
pub struct Runtime<D: Driver> {
    driver: D,
    app: App,
    connection: ConnectionManager,
    /// Status last handed to the App.
    reported_status: ConnectionStatus,
    /// App asked for a render during this cycle.
    dirty: bool,
}

impl<D: Driver> Runtime<D> {
    /// Create a new runtime. A name given here is announced on the first
    /// successful connection.
    pub fn new(driver: D, config: ConnectionConfig, display_name: Option<DisplayName>) -> Self {
        let session = display_name.clone().map_or_else(Session::new, Session::with_display_name);
        let connection = ConnectionManager::with_session(config, session);
        let mut app = App::new(connection.config(), display_name);

        let reported_status = connection.status();
        app.handle(AppEvent::Status(reported_status));

        Self { driver, app, connection, reported_status, dirty: true }
    }

    /// Run the main event loop.
    ///
    /// Connects, then processes driver events until the user quits or the
    /// driver runs out of events. The driver is stopped either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(&mut self) -> Result<(), D::Error> {
        let result = self.event_loop().await;
        self.driver.stop();
        result
    }

    async fn event_loop(&mut self) -> Result<(), D::Error> {
        let actions = self.connection.connect();
        if self.execute(connection_steps(actions).collect()).await? {
            return Ok(());
        }
        self.flush()?;

        while let Some(event) = self.driver.poll_event().await? {
            if self.process_event(event).await? {
                tracing::info!("quit requested");
                break;
            }
        }

        Ok(())
    }

    /// Process one driver event.
    ///
    /// Returns `true` if the application should quit.
    async fn process_event(&mut self, event: DriverEvent) -> Result<bool, D::Error> {
        let steps: VecDeque<Step> = match event {
            DriverEvent::App(event) => app_steps(self.app.handle(event)).collect(),
            DriverEvent::Transport(event) => connection_steps(self.on_transport(event)).collect(),
            DriverEvent::ReconnectDue => {
                connection_steps(self.connection.handle_reconnect_timer()).collect()
            },
        };

        if self.execute(steps).await? {
            return Ok(true);
        }
        self.flush()?;
        Ok(false)
    }

    /// Feed a transport notification to the connection state machine.
    fn on_transport(&mut self, event: TransportEvent) -> Vec<ConnectionAction> {
        match event {
            TransportEvent::Opened => self.connection.handle_open(),
            TransportEvent::Closed => self.connection.handle_close(),
            TransportEvent::Error(diagnostic) => self.connection.handle_error(diagnostic),
            TransportEvent::Message(frame) => self.connection.handle_message(frame),
        }
    }

    /// Execute queued steps until none remain.
    ///
    /// Once the queue drains, a changed connection status is reported to the
    /// App, which may queue more work. Returns `true` if should quit.
    async fn execute(&mut self, mut pending: VecDeque<Step>) -> Result<bool, D::Error> {
        loop {
            let Some(step) = pending.pop_front() else {
                let status = self.connection.status();
                if status == self.reported_status {
                    return Ok(false);
                }
                self.reported_status = status;
                pending.extend(app_steps(self.app.handle(AppEvent::Status(status))));
                continue;
            };

            match step {
                Step::App(AppAction::Render) => self.dirty = true,
                Step::App(AppAction::Quit) => return Ok(true),
                Step::App(AppAction::SetName(name)) => {
                    pending.extend(connection_steps(self.connection.set_name(name)));
                },
                Step::App(AppAction::SendText(text)) => {
                    pending.extend(connection_steps(self.connection.send_text(text)));
                },
                Step::App(AppAction::Restart) => {
                    pending.extend(connection_steps(self.restart()));
                },

                Step::Connection(ConnectionAction::Open { url }) => self.driver.open(&url)?,
                Step::Connection(ConnectionAction::Send(frame)) => self.driver.send(frame).await?,
                Step::Connection(ConnectionAction::ScheduleReconnect { delay, attempt }) => {
                    tracing::debug!(attempt, ?delay, "arming reconnect timer");
                    self.driver.schedule_reconnect(delay);
                },
                Step::Connection(ConnectionAction::Deliver(event)) => {
                    pending.extend(app_steps(self.app.handle(AppEvent::Inbound(event))));
                },
                Step::Connection(
                    ConnectionAction::Diagnostic(error) | ConnectionAction::Exhausted(error),
                ) => {
                    pending.extend(app_steps(self.app.handle(AppEvent::Diagnostic(error))));
                },
            }
        }
    }

    /// Replace the failed connection manager with a fresh one that keeps the
    /// display name, and start connecting.
    fn restart(&mut self) -> Vec<ConnectionAction> {
        self.driver.close();

        let config = self.connection.config().clone();
        let session = self
            .connection
            .session()
            .display_name()
            .cloned()
            .map_or_else(Session::new, Session::with_display_name);

        tracing::info!(url = %config.url, "restarting connection");
        self.connection = ConnectionManager::with_session(config, session);
        self.connection.connect()
    }

    /// Render once if anything asked for it.
    fn flush(&mut self) -> Result<(), D::Error> {
        if std::mem::take(&mut self.dirty) {
            self.driver.render(&self.app)?;
        }
        Ok(())
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a reference to the connection state machine
    pub fn connection(&self) -> &ConnectionManager {
        &self.connection
    }

    /// Get a reference to the driver
    pub fn driver(&self) -> &D {
        &self.driver
    }
}
