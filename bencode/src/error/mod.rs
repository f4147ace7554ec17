//! Error types for the bencode library.
//!
//! Every parse failure carries the source position at which it was detected
//! so callers can report accurate diagnostics.

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

/// Errors produced while decoding or encoding bencode data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BencodeError {
    /// Source contained no data at all
    #[error("empty input")]
    EmptyInput,

    /// Source ended mid-token
    #[error("source exhausted at {position}")]
    BufferExhausted { position: Position },

    /// A byte that cannot begin or continue any bencode value
    #[error("unexpected character '{found}' at {position}")]
    UnexpectedCharacter { found: char, position: Position },

    /// Malformed integer: empty digits, leading zeros, "-0" or overflow
    #[error("invalid integer at {position}")]
    InvalidInteger { position: Position },

    /// Integer not terminated with 'e'
    #[error("unterminated integer at {position}")]
    UnterminatedInteger { position: Position },

    /// String length prefix is not a valid decimal count
    #[error("invalid string length at {position}")]
    InvalidStringLength { position: Position },

    /// Fewer content bytes than the length prefix declared
    #[error("string shorter than declared length {expected} at {position}")]
    StringTooShort { expected: usize, position: Position },

    /// List not terminated with 'e'
    #[error("unterminated list at {position}")]
    UnterminatedList { position: Position },

    /// Dictionary not terminated with 'e'
    #[error("unterminated dictionary at {position}")]
    UnterminatedDictionary { position: Position },

    /// Dictionary key was not a byte string
    #[error("dictionary key must be a string at {position}")]
    KeyMustBeString { position: Position },

    /// The same dictionary key appeared twice
    #[error("duplicate dictionary key \"{key}\" at {position}")]
    DuplicateKey { key: String, position: Position },

    /// Dictionary keys were not in strictly increasing byte order
    #[error("dictionary key \"{key}\" out of order at {position}")]
    UnorderedKey { key: String, position: Position },

    /// Bytes remained after the top-level value in strict mode
    #[error("trailing bytes after value at {position}")]
    TrailingBytes { position: Position },

    /// Nesting exceeded the configured maximum depth
    #[error("nesting too deep at {position}")]
    NestingTooDeep { position: Position },

    /// A required dictionary field was absent
    #[error("missing required field \"{field}\"")]
    MissingField { field: String },

    /// A dictionary field held a value of the wrong type
    #[error("field \"{field}\" must be {expected}")]
    FieldType {
        field: String,
        expected: &'static str,
    },

    /// Underlying file or stream failure
    #[error("io error: {reason}")]
    Io { reason: String },
}

impl From<std::io::Error> for BencodeError {
    fn from(error: std::io::Error) -> Self {
        BencodeError::Io {
            reason: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_displays_line_column_offset() {
        let position = Position {
            line: 2,
            column: 7,
            offset: 12,
        };
        assert_eq!(format!("{}", position), "line 2, column 7 (offset 12)");
    }

    #[test]
    fn errors_display_their_position() {
        let error = BencodeError::InvalidInteger {
            position: Position {
                line: 1,
                column: 3,
                offset: 2,
            },
        };
        assert_eq!(
            format!("{}", error),
            "invalid integer at line 1, column 3 (offset 2)"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        assert!(matches!(
            BencodeError::from(io),
            BencodeError::Io { reason } if reason.contains("no such file")
        ));
    }
}
