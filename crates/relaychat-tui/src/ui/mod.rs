//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod chat;
mod input;
mod status;
mod users;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::{App, InputState};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App, input: &InputState) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [main_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_main_area(frame, app, *main_area);
    input::render(frame, app, input, *input_area);
    status::render(frame, app, *status_area);
}

/// Render the main area (chat + online users sidebar).
fn render_main_area(frame: &mut Frame, app: &App, area: Rect) {
    const USERS_SIDEBAR_WIDTH: u16 = 18;
    const CHAT_AREA_MIN_WIDTH: u16 = 20;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(CHAT_AREA_MIN_WIDTH),
            Constraint::Length(USERS_SIDEBAR_WIDTH),
        ])
        .split(area);

    let [chat_area, users_area] = chunks.as_ref() else {
        return;
    };

    chat::render(frame, app, *chat_area);
    users::render(frame, app, *users_area);
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};
    use relaychat_app::{
        AppEvent, ConnectionConfig, ConnectionState, ConnectionStatus, DisplayName,
    };
    use relaychat_proto::decode;

    use super::*;
    use crate::KeyInput;

    fn draw(app: &App, input: &InputState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal.draw(|frame| render(frame, app, input)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn status(state: ConnectionState, reconnect_attempts: u32) -> AppEvent {
        AppEvent::Status(ConnectionStatus { state, reconnect_attempts, max_reconnect_attempts: 5 })
    }

    fn connected_app() -> App {
        let config = ConnectionConfig::new("ws://relay.test:8765");
        let mut app = App::new(&config, DisplayName::new("alice").ok());
        app.handle(status(ConnectionState::Connected, 0));
        app
    }

    #[test]
    fn renders_messages_users_and_status() {
        let mut app = connected_app();
        for frame in ["USERS:alice,bob", "SYSTEM: bob joined", "bob: hi alice"] {
            app.handle(AppEvent::Inbound(decode(frame)));
        }

        let screen = draw(&app, &InputState::new());

        assert!(screen.contains("SYSTEM: bob joined"));
        assert!(screen.contains("bob: hi alice"));
        assert!(screen.contains("Online (2)"));
        assert!(screen.contains("bob"));
        assert!(screen.contains("Connected"));
        assert!(screen.contains("ws://relay.test:8765"));
    }

    #[test]
    fn renders_input_buffer() {
        let app = connected_app();
        let mut input = InputState::new();
        for c in "hello there".chars() {
            input.handle_key(KeyInput::Char(c));
        }

        let screen = draw(&app, &input);

        assert!(screen.contains("> hello there"));
    }

    #[test]
    fn renders_reconnect_progress_and_diagnostic() {
        let mut app = connected_app();
        app.handle(AppEvent::Diagnostic(relaychat_core::ConnectionError::TransportClosed));
        app.handle(status(ConnectionState::Reconnecting, 2));

        let screen = draw(&app, &InputState::new());

        assert!(screen.contains("Reconnecting (2/5)..."));
        assert!(screen.contains("connection closed"));
    }

    #[test]
    fn prompts_for_a_name_when_none_is_set() {
        let app = App::new(&ConnectionConfig::new("ws://relay.test:8765"), None);

        let screen = draw(&app, &InputState::new());

        assert!(screen.contains("/name"));
        assert!(screen.contains("No messages yet"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let app = connected_app();
        let mut terminal = Terminal::new(TestBackend::new(10, 3)).unwrap();
        terminal.draw(|frame| render(frame, &app, &InputState::new())).unwrap();
    }
}
