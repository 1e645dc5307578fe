//! Error types for plugin-core

/// Result type for plugin-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing, constructing or resolving plugin references
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A character that fits none of the expected tokens.
    ///
    /// `position` counts characters of `text`, which is always the full
    /// original text the caller handed in.
    #[error("Invalid character {character:?} at {position} in {text:?}")]
    InvalidCharacter {
        text: String,
        position: usize,
        character: char,
    },

    #[error("End of text, expected {expected} in {text:?}")]
    EndOfText { text: String, expected: String },

    #[error("Invalid {kind} length {length} in {text:?}, expected {min}..={max}")]
    InvalidNameLength {
        kind: &'static str,
        text: String,
        length: usize,
        min: usize,
        max: usize,
    },

    #[error("Invalid url {text:?}: {reason}")]
    InvalidUrl { text: String, reason: String },

    #[error("Invalid alias {name}: {reason}")]
    InvalidAlias { name: String, reason: String },

    #[error("Duplicate {kind} {name}")]
    DuplicateName { kind: &'static str, name: String },

    #[error("Duplicate url {url}")]
    DuplicateUrl { url: String },

    #[error("Aliases {first} and {second} both refer to {target}")]
    DuplicateAliasTarget {
        target: String,
        first: String,
        second: String,
    },

    #[error("Alias {alias} refers to {target} which is also declared as a name")]
    AliasConflict { alias: String, target: String },

    #[error("Unknown {name}")]
    UnknownName { kind: &'static str, name: String },

    #[error("Unknown environment value {name}")]
    UnknownEnvironmentValue { name: String },

    #[error("Unsupported value {value}")]
    UnsupportedValue { value: String },

    /// Failure reported by a provider implementation.
    #[error("{message}")]
    Provider { message: String },
}

impl Error {
    /// Invalid character at `position` (in characters) of `text`.
    ///
    /// Falls back to [`Error::EndOfText`] when the position is past the end.
    pub fn invalid_character(text: &str, position: usize) -> Self {
        match text.chars().nth(position) {
            Some(character) => Self::InvalidCharacter {
                text: text.to_string(),
                position,
                character,
            },
            None => Self::end_of_text(text, "more text"),
        }
    }

    pub fn end_of_text(text: &str, expected: impl Into<String>) -> Self {
        Self::EndOfText {
            text: text.to_string(),
            expected: expected.into(),
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Shifts an invalid character report into the coordinates of `text`,
    /// which contains the originally reported text starting at `offset`.
    ///
    /// Other errors are returned unchanged.
    pub fn relocate(self, text: &str, offset: usize) -> Self {
        match self {
            Self::InvalidCharacter {
                position,
                character,
                ..
            } => Self::InvalidCharacter {
                text: text.to_string(),
                position: position + offset,
                character,
            },
            Self::EndOfText { expected, .. } => Self::EndOfText {
                text: text.to_string(),
                expected,
            },
            other => other,
        }
    }
}
