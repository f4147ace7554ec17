//! Error types for the XML library.
//!
//! Well-formedness failures are fatal and carry the source position at which
//! they were detected. DTD validity failures are non-fatal `ValidationError`
//! items collected by the validator.

use core::fmt;
use thiserror::Error;

/// Location within a source, tracked in Unicode characters after transcoding
/// and newline normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// 1-based line number
    pub line: usize,
    /// 1-based column number
    pub column: usize,
    /// 0-based character offset
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

/// Errors produced while parsing or stringifying XML documents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XmlError {
    /// Empty source buffer passed to be parsed
    #[error("empty source buffer passed to be parsed")]
    EmptySource,

    /// The input could not be decoded as UTF-8 or UTF-16
    #[error("source encoding is not supported or malformed")]
    UnsupportedEncoding,

    /// Source ended before the document was complete
    #[error("source exhausted at {position}")]
    BufferExhausted { position: Position },

    /// A well-formedness violation
    #[error("{reason} at {position}")]
    Syntax { reason: String, position: Position },

    /// An end tag that does not match the open element
    #[error("end tag \"{name}\" does not match open element at {position}")]
    UnbalancedTag { name: String, position: Position },

    /// The same attribute name appeared twice on one element
    #[error("duplicate attribute \"{name}\" at {position}")]
    DuplicateAttribute { name: String, position: Position },

    /// Reference to an entity with no declaration
    #[error("reference to undefined entity \"{name}\" at {position}")]
    UnknownEntity { name: String, position: Position },

    /// Entity expansion referenced an entity already being expanded
    #[error("recursive entity reference \"{name}\" at {position}")]
    RecursiveEntity { name: String, position: Position },

    /// Character reference outside the XML character range
    #[error("invalid character reference at {position}")]
    InvalidCharacterReference { position: Position },

    /// Underlying file or stream failure
    #[error("io error: {reason}")]
    Io { reason: String },
}

impl XmlError {
    /// Shorthand for a syntax error at a position.
    pub(crate) fn syntax(reason: impl Into<String>, position: Position) -> Self {
        XmlError::Syntax {
            reason: reason.into(),
            position,
        }
    }
}

impl From<std::io::Error> for XmlError {
    fn from(error: std::io::Error) -> Self {
        XmlError::Io {
            reason: error.to_string(),
        }
    }
}

/// A DTD validity failure. Non-fatal: the validator accumulates these and
/// returns them as a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Name of the element the failure was detected on
    pub element: String,
    /// Human-readable description of the violated constraint
    pub reason: String,
}

impl ValidationError {
    pub fn new(element: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element <{}>: {}", self.element, self.reason)
    }
}
