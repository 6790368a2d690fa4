//! Online users sidebar

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use relaychat_app::{App, DisplayName};

/// Render the online users sidebar. The user's own name is highlighted.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let own_name = app.display_name().map(DisplayName::as_str);

    let items: Vec<ListItem> = app
        .users()
        .iter()
        .filter(|user| !user.is_empty())
        .map(|user| {
            let style = if Some(user.as_str()) == own_name {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(user.as_str(), style)))
        })
        .collect();

    let title = format!(" Online ({}) ", items.len());
    let block = Block::default().borders(Borders::ALL).title(title);
    let list = List::new(items).block(block);

    frame.render_widget(list, area);
}
