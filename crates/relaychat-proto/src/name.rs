//! Validated display names.

use std::fmt;

use crate::InvalidNameError;

/// Longest display name, in characters, the relay registers.
pub const MAX_NAME_CHARS: usize = 20;

/// A trimmed display name the relay will accept.
///
/// # Invariants
///
/// - Non-empty after trimming.
/// - At most [`MAX_NAME_CHARS`] characters.
/// - Contains no `:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    /// Trim and validate a user-supplied name.
    ///
    /// # Errors
    ///
    /// - `InvalidNameError::Empty` if nothing is left after trimming
    /// - `InvalidNameError::TooLong` if longer than [`MAX_NAME_CHARS`]
    /// - `InvalidNameError::ContainsColon` if the name contains `:`
    pub fn new(raw: &str) -> Result<Self, InvalidNameError> {
        let name = raw.trim();

        if name.is_empty() {
            return Err(InvalidNameError::Empty);
        }

        let len = name.chars().count();
        if len > MAX_NAME_CHARS {
            return Err(InvalidNameError::TooLong { len, max: MAX_NAME_CHARS });
        }

        if name.contains(':') {
            return Err(InvalidNameError::ContainsColon);
        }

        Ok(Self(name.to_owned()))
    }

    /// The name as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for DisplayName {
    type Error = InvalidNameError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl std::str::FromStr for DisplayName {
    type Err = InvalidNameError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::new(raw)
    }
}
