//! Input line parsing.
//!
//! A submitted line is either a local command or chat text. Only the commands
//! below are interpreted; any other line, including unknown `/` commands, is
//! sent to the relay verbatim so relay-side commands keep working.
//!
//! ```text
//! /name <name>    choose a display name
//! /restart        start over after the connection has failed
//! /help           list commands
//! /quit           exit
//! ```

use relaychat_proto::{DisplayName, InvalidNameError};

/// Parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Nothing to do (empty line).
    Empty,
    /// `/name <name>` with a valid name.
    SetName(DisplayName),
    /// `/name` with a missing or invalid name.
    InvalidName(InvalidNameError),
    /// `/restart`
    Restart,
    /// `/help`
    Help,
    /// `/quit`
    Quit,
    /// Anything else, to be sent as typed.
    Text(String),
}

/// Parse a submitted line.
///
/// Command words are case-insensitive and may be surrounded by whitespace.
/// Chat text is kept exactly as typed, whitespace included.
pub fn parse(line: &str) -> Command {
    if line.is_empty() {
        return Command::Empty;
    }

    let trimmed = line.trim();
    let (word, rest) = trimmed.split_once(char::is_whitespace).unwrap_or((trimmed, ""));
    let rest = rest.trim_start();

    match word.to_ascii_lowercase().as_str() {
        "/name" => match DisplayName::new(rest) {
            Ok(name) => Command::SetName(name),
            Err(e) => Command::InvalidName(e),
        },
        "/restart" if rest.is_empty() => Command::Restart,
        "/help" if rest.is_empty() => Command::Help,
        "/quit" if rest.is_empty() => Command::Quit,
        _ => Command::Text(line.to_string()),
    }
}
