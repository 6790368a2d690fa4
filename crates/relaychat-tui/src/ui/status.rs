//! Status bar
//!
//! Displays connection status and the latest transient message.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use relaychat_app::{App, ConnectionState};

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let style = match app.connection_status().state {
        ConnectionState::Disconnected | ConnectionState::Failed => {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        },
        ConnectionState::Connecting | ConnectionState::Reconnecting => {
            Style::default().fg(Color::Yellow)
        },
        ConnectionState::Connected => {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        },
    };

    let message = app.status_message().map_or_else(String::new, |message| format!(" | {message}"));

    let status_line = Line::from(vec![
        Span::raw(" "),
        Span::styled(app.connection_label(), style),
        Span::styled(message, Style::default().fg(Color::Gray)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
