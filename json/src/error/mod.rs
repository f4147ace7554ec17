//! Error types for the JSON library.

use core::fmt;
use thiserror::Error;

/// Location within a source, tracked in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// 1-based line number
    pub line: usize,
    /// 1-based column number
    pub column: usize,
    /// 0-based byte offset
    pub offset: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, column {} (offset {})",
            self.line, self.column, self.offset
        )
    }
}

/// Errors produced while parsing or stringifying JSON data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonError {
    /// Source contained no value
    #[error("empty input")]
    EmptyInput,

    /// Source ended mid-token
    #[error("source exhausted at {position}")]
    BufferExhausted { position: Position },

    /// The grammar expected something else here
    #[error("expected {expected} at {position}")]
    Syntax {
        expected: &'static str,
        position: Position,
    },

    /// A byte that cannot begin any JSON token
    #[error("unexpected character '{found}' at {position}")]
    UnexpectedCharacter { found: char, position: Position },

    /// Number does not follow the RFC 8259 grammar
    #[error("invalid number at {position}")]
    InvalidNumber { position: Position },

    /// The same object key appeared twice; the position is the second key's
    #[error("duplicate object key \"{key}\" at {position}")]
    DuplicateKey { key: String, position: Position },

    /// Backslash escape that is not part of the JSON escape set
    #[error("invalid escape sequence at {position}")]
    InvalidEscape { position: Position },

    /// A lone or mismatched UTF-16 surrogate in a \u escape
    #[error("invalid surrogate pair at {position}")]
    InvalidSurrogate { position: Position },

    /// String content was not valid UTF-8
    #[error("invalid utf-8 in string at {position}")]
    InvalidUtf8 { position: Position },

    /// Non-whitespace bytes after the top-level value
    #[error("trailing content after value at {position}")]
    TrailingContent { position: Position },

    /// Nesting exceeded the configured maximum depth
    #[error("nesting too deep at {position}")]
    NestingTooDeep { position: Position },

    /// Underlying file or stream failure
    #[error("io error: {reason}")]
    Io { reason: String },
}

impl From<std::io::Error> for JsonError {
    fn from(error: std::io::Error) -> Self {
        JsonError::Io {
            reason: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_their_position() {
        let error = JsonError::DuplicateKey {
            key: "a".to_string(),
            position: Position {
                line: 1,
                column: 9,
                offset: 8,
            },
        };
        assert_eq!(
            format!("{}", error),
            "duplicate object key \"a\" at line 1, column 9 (offset 8)"
        );
    }
}
