//! Chat area
//!
//! Displays the message log, newest at the bottom.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use relaychat_app::{App, ChatLine, LineKind};

const BORDER_SIZE: u16 = 2;

fn line_style(kind: LineKind) -> Style {
    match kind {
        LineKind::Chat => Style::default(),
        LineKind::Private => Style::default().fg(Color::Magenta),
        LineKind::System => Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        LineKind::Local => Style::default().fg(Color::DarkGray),
    }
}

fn item(line: &ChatLine) -> ListItem<'_> {
    ListItem::new(Line::from(Span::styled(line.text.as_str(), line_style(line.kind))))
}

/// Render the chat area.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(" {} ", app.relay_url());
    let block = Block::default().borders(Borders::ALL).title(title);

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;

    let items: Vec<ListItem> = if app.messages().next().is_none() {
        vec![ListItem::new(Line::from(Span::styled(
            "No messages yet",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        let skip = app.messages().len().saturating_sub(visible_height);
        app.messages().skip(skip).map(item).collect()
    };

    let list = List::new(items).block(block);

    frame.render_widget(list, area);
}
