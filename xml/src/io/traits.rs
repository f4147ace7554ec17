//! Source and destination interfaces for the parser and stringifier.
//!
//! The logical unit of an XML source is one Unicode scalar. Transcoding from
//! UTF-8/UTF-16 and newline normalization happen once at source construction,
//! so the parser only ever sees normalized characters.

use crate::error::{Position, XmlError};

/// Pull-style character source with lookahead, bounded rewind and position
/// reporting.
pub trait ISource {
    /// Peek the character at the current position without consuming it.
    /// Returns `None` at end of input.
    fn current(&self) -> Option<char>;

    /// Advance by one character. Fails with `BufferExhausted` if already at end.
    fn next(&mut self) -> Result<(), XmlError>;

    /// Returns true while characters remain to be consumed.
    fn more(&self) -> bool;

    /// Rewind by `length` characters, clamping at the start of the source.
    fn backup(&mut self, length: usize);

    /// Current character offset from the start of the source.
    fn position(&self) -> usize;

    /// Copy of the characters in `[start, end)` as a String. Out-of-range
    /// bounds are clamped.
    fn get_range(&self, start: usize, end: usize) -> String;

    /// 1-based line number of the current position.
    fn line(&self) -> usize;

    /// 1-based column number of the current position.
    fn column(&self) -> usize;

    /// Full position of the next unconsumed character, for diagnostics.
    fn error_position(&self) -> Position {
        Position {
            line: self.line(),
            column: self.column(),
            offset: self.position(),
        }
    }

    /// Skip any whitespace at the current position.
    fn ignore_whitespace(&mut self) {
        while self.current().is_some_and(|c| c.is_whitespace()) {
            // current() returned a character, so next() cannot fail here
            let _ = self.next();
        }
    }

    /// Consume `literal` atomically. On a partial match the position is
    /// restored and false is returned.
    fn match_literal(&mut self, literal: &str) -> bool {
        let mut matched = 0;
        for expected in literal.chars() {
            if self.current() != Some(expected) {
                self.backup(matched);
                return false;
            }
            let _ = self.next();
            matched += 1;
        }
        true
    }
}

/// Append-only sink for serialized XML text.
pub trait IDestination {
    /// Append a string as UTF-8 bytes.
    fn add_bytes(&mut self, bytes: &str) -> Result<(), XmlError>;

    /// Append a single character, encoded as UTF-8.
    fn add_char(&mut self, character: char) -> Result<(), XmlError>;

    /// Discard everything written so far.
    fn clear(&mut self);
}
