//! Input state and key handling for the TUI.
//!
//! This module owns all text input state (buffer, cursor, history) and handles
//! character-level key events. A finished line is handed to the App as
//! [`AppEvent::Submit`]; the App decides what it means.

use relaychat_app::AppEvent;

/// Lines kept for Up/Down recall.
const HISTORY_LEN: usize = 100;

/// Key input events from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Character input.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Escape key, or Ctrl-C.
    Esc,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow (previous line).
    Up,
    /// Down arrow (next line).
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
}

/// Input state for the TUI.
///
/// Manages the text input buffer, the cursor and recently submitted lines.
/// The cursor counts characters, not bytes.
#[derive(Debug, Default)]
pub struct InputState {
    /// Text buffer for user input.
    buffer: String,
    /// Cursor position within the buffer, in characters.
    cursor: usize,
    /// Submitted lines, oldest first.
    history: Vec<String>,
    /// Position while browsing history. `None` when editing a fresh line.
    history_index: Option<usize>,
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text in the input buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Current cursor position, in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Handle a key input event.
    ///
    /// Returns the event for the App, or `None` if the key changed nothing.
    pub fn handle_key(&mut self, key: KeyInput) -> Option<AppEvent> {
        match key {
            KeyInput::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.buffer.insert(at, c);
                self.cursor = self.cursor.saturating_add(1);
                Some(AppEvent::InputEdited)
            },
            KeyInput::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                self.cursor = self.cursor.saturating_sub(1);
                let at = self.byte_offset(self.cursor);
                self.buffer.remove(at);
                Some(AppEvent::InputEdited)
            },
            KeyInput::Delete => {
                if self.cursor >= self.len() {
                    return None;
                }
                let at = self.byte_offset(self.cursor);
                self.buffer.remove(at);
                Some(AppEvent::InputEdited)
            },
            KeyInput::Left => self.move_cursor(self.cursor.saturating_sub(1)),
            KeyInput::Right => self.move_cursor(self.cursor.saturating_add(1).min(self.len())),
            KeyInput::Home => self.move_cursor(0),
            KeyInput::End => self.move_cursor(self.len()),
            KeyInput::Up => self.recall_previous(),
            KeyInput::Down => self.recall_next(),
            KeyInput::Enter => self.submit(),
            KeyInput::Esc => Some(AppEvent::QuitRequested),
        }
    }

    /// Take the buffer as a submitted line.
    fn submit(&mut self) -> Option<AppEvent> {
        let line = std::mem::take(&mut self.buffer);
        self.cursor = 0;
        self.history_index = None;

        if line.is_empty() {
            return Some(AppEvent::InputEdited);
        }

        if self.history.last() != Some(&line) {
            if self.history.len() >= HISTORY_LEN {
                self.history.remove(0);
            }
            self.history.push(line.clone());
        }

        Some(AppEvent::Submit(line))
    }

    fn recall_previous(&mut self) -> Option<AppEvent> {
        let index = match self.history_index {
            None => self.history.len().checked_sub(1)?,
            Some(0) => return None,
            Some(i) => i.saturating_sub(1),
        };
        self.recall(Some(index))
    }

    fn recall_next(&mut self) -> Option<AppEvent> {
        let index = self.history_index?;
        let next = index.saturating_add(1);
        self.recall((next < self.history.len()).then_some(next))
    }

    /// Replace the buffer with a history entry, or clear it for `None`.
    fn recall(&mut self, index: Option<usize>) -> Option<AppEvent> {
        self.history_index = index;
        self.buffer = index.and_then(|i| self.history.get(i)).cloned().unwrap_or_default();
        self.cursor = self.len();
        Some(AppEvent::InputEdited)
    }

    fn move_cursor(&mut self, to: usize) -> Option<AppEvent> {
        if to == self.cursor {
            return None;
        }
        self.cursor = to;
        Some(AppEvent::InputEdited)
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Byte offset of the `chars`-th character.
    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer.char_indices().nth(chars).map_or(self.buffer.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> InputState {
        let mut input = InputState::new();
        for c in text.chars() {
            input.handle_key(KeyInput::Char(c));
        }
        input
    }

    #[test]
    fn char_input_adds_to_buffer() {
        let input = typed("hi");

        assert_eq!(input.buffer(), "hi");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn backspace_removes_char() {
        let mut input = typed("ab");
        input.handle_key(KeyInput::Backspace);

        assert_eq!(input.buffer(), "a");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn backspace_at_start_does_nothing() {
        let mut input = InputState::new();
        assert_eq!(input.handle_key(KeyInput::Backspace), None);
    }

    #[test]
    fn enter_submits_and_clears_buffer() {
        let mut input = typed("test");
        let event = input.handle_key(KeyInput::Enter);

        assert_eq!(event, Some(AppEvent::Submit("test".into())));
        assert!(input.buffer().is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn empty_enter_is_not_submitted() {
        let mut input = InputState::new();
        assert_eq!(input.handle_key(KeyInput::Enter), Some(AppEvent::InputEdited));
    }

    #[test]
    fn whitespace_is_submitted_as_typed() {
        let mut input = typed("  hi ");
        assert_eq!(input.handle_key(KeyInput::Enter), Some(AppEvent::Submit("  hi ".into())));
    }

    #[test]
    fn cursor_movement() {
        let mut input = typed("abc");

        input.handle_key(KeyInput::Home);
        assert_eq!(input.cursor(), 0);

        input.handle_key(KeyInput::End);
        assert_eq!(input.cursor(), 3);

        input.handle_key(KeyInput::Left);
        assert_eq!(input.cursor(), 2);

        input.handle_key(KeyInput::Right);
        assert_eq!(input.cursor(), 3);

        assert_eq!(input.handle_key(KeyInput::Right), None);
    }

    #[test]
    fn editing_in_the_middle_of_multibyte_text() {
        let mut input = typed("héllo");
        input.handle_key(KeyInput::Home);
        input.handle_key(KeyInput::Right);
        input.handle_key(KeyInput::Delete);
        input.handle_key(KeyInput::Char('e'));

        assert_eq!(input.buffer(), "hello");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn history_recall() {
        let mut input = typed("first");
        input.handle_key(KeyInput::Enter);
        for c in "second".chars() {
            input.handle_key(KeyInput::Char(c));
        }
        input.handle_key(KeyInput::Enter);

        input.handle_key(KeyInput::Up);
        assert_eq!(input.buffer(), "second");
        input.handle_key(KeyInput::Up);
        assert_eq!(input.buffer(), "first");
        assert_eq!(input.handle_key(KeyInput::Up), None);

        input.handle_key(KeyInput::Down);
        assert_eq!(input.buffer(), "second");
        input.handle_key(KeyInput::Down);
        assert_eq!(input.buffer(), "");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn esc_requests_quit() {
        let mut input = InputState::new();
        assert_eq!(input.handle_key(KeyInput::Esc), Some(AppEvent::QuitRequested));
    }
}
