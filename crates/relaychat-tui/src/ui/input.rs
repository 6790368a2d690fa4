//! Input line
//!
//! Displays the input buffer with cursor. The border title shows the display
//! name the line will be sent under.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use relaychat_app::App;

use crate::InputState;

const PROMPT_WIDTH: u16 = 3; // "> " plus the left border
const INPUT_LINE_OFFSET_Y: u16 = 1; // inside top border
const RIGHT_PADDING: u16 = 1; // inside right border

/// Render the input line.
pub fn render(frame: &mut Frame, app: &App, input: &InputState, area: Rect) {
    let title = match app.display_name() {
        Some(name) => format!(" {name} "),
        None => " type /name <name> to pick a name ".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let input_text = format!("> {}", input.buffer());
    let paragraph =
        Paragraph::new(input_text).style(Style::default().fg(Color::White)).block(block);

    frame.render_widget(paragraph, area);

    let available_width = area.width.saturating_sub(PROMPT_WIDTH + RIGHT_PADDING);
    let cursor = u16::try_from(input.cursor()).unwrap_or(u16::MAX);
    let cursor_offset = cursor.min(available_width);

    let cursor_x = area.x.saturating_add(PROMPT_WIDTH).saturating_add(cursor_offset);
    let cursor_y = area.y.saturating_add(INPUT_LINE_OFFSET_Y);
    let max_x = area.x.saturating_add(area.width).saturating_sub(RIGHT_PADDING);
    let cursor_x = cursor_x.min(max_x);

    frame.set_cursor_position((cursor_x, cursor_y));
}
