//! Source and destination interfaces for the parser and stringifier.
//!
//! JSON is parsed byte-wise; multi-byte UTF-8 sequences only ever occur
//! inside string content and are decoded when the string is materialized.

use crate::error::{JsonError, Position};

/// Pull-style byte source. The logical unit is one byte.
pub trait ISource {
    /// Peek the byte at the current position without consuming it.
    /// Returns `None` at end of input.
    fn current(&self) -> Option<u8>;

    /// Advance by one byte. Fails with `BufferExhausted` if already at end.
    fn next(&mut self) -> Result<(), JsonError>;

    /// Returns true while bytes remain to be consumed.
    fn more(&self) -> bool;

    /// Rewind by `length` bytes, clamping at the start of the source.
    fn backup(&mut self, length: usize);

    /// Current byte offset from the start of the source.
    fn position(&self) -> usize;

    /// Copy of the bytes in `[start, end)`. Out-of-range bounds are clamped.
    fn get_range(&self, start: usize, end: usize) -> Vec<u8>;

    /// 1-based line number of the current position.
    fn line(&self) -> usize;

    /// 1-based column number of the current position.
    fn column(&self) -> usize;

    /// Full position of the next unconsumed byte, for diagnostics.
    fn error_position(&self) -> Position {
        Position {
            line: self.line(),
            column: self.column(),
            offset: self.position(),
        }
    }

    /// Skip insignificant whitespace between tokens.
    fn ignore_whitespace(&mut self) {
        while let Some(byte) = self.current() {
            if !matches!(byte, b' ' | b'\t' | b'\n' | b'\r') {
                break;
            }
            // current() returned a byte, so next() cannot fail here
            let _ = self.next();
        }
    }

    /// Consume `literal` atomically. On a partial match the position is
    /// restored and false is returned.
    fn match_bytes(&mut self, literal: &[u8]) -> bool {
        let mut matched = 0;
        while matched < literal.len() && self.current() == Some(literal[matched]) {
            let _ = self.next();
            matched += 1;
        }
        if matched == literal.len() {
            true
        } else {
            self.backup(matched);
            false
        }
    }
}

/// Append-only byte sink.
pub trait IDestination {
    /// Append a single byte.
    fn add_byte(&mut self, byte: u8) -> Result<(), JsonError>;

    /// Append a string as UTF-8 bytes.
    fn add_bytes(&mut self, bytes: &str) -> Result<(), JsonError>;

    /// Discard everything written so far.
    fn clear(&mut self);
}
