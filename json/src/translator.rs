//! Translation to/from JSON string escapes within source strings.
//!
//! `from_escaped` resolves the escape set of RFC 8259 including `\uXXXX`
//! surrogate pairs; `to_escaped` emits the minimal escape set, optionally
//! forcing all non-ASCII scalars into `\uXXXX` form.

use core::fmt::Write as _;
use thiserror::Error;

/// Failures while resolving string escapes. The offset is in bytes from the
/// start of the translated string contents; the parser rebases it onto the
/// source position of the enclosing string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// Backslash escape outside the JSON escape set, or truncated \uXXXX
    #[error("invalid escape sequence at offset {offset}")]
    InvalidEscape { offset: usize },

    /// Lone high/low surrogate, or a high surrogate not followed by a low one
    #[error("invalid surrogate pair at offset {offset}")]
    InvalidSurrogate { offset: usize },
}

/// Resolves JSON string escapes into the unicode string they denote.
/// The input is the raw contents between the enclosing quotes.
pub fn from_escaped(contents: &str) -> Result<String, TranslateError> {
    let bytes = contents.as_bytes();
    let mut translated = String::with_capacity(contents.len());
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] != b'\\' {
            // Copy one UTF-8 encoded character through unchanged
            let character = contents[index..]
                .chars()
                .next()
                .ok_or(TranslateError::InvalidEscape { offset: index })?;
            translated.push(character);
            index += character.len_utf8();
            continue;
        }
        let escape_offset = index;
        index += 1;
        let code = *bytes
            .get(index)
            .ok_or(TranslateError::InvalidEscape { offset: escape_offset })?;
        index += 1;
        match code {
            b'"' => translated.push('"'),
            b'\\' => translated.push('\\'),
            b'/' => translated.push('/'),
            b'b' => translated.push('\u{0008}'),
            b'f' => translated.push('\u{000c}'),
            b'n' => translated.push('\n'),
            b'r' => translated.push('\r'),
            b't' => translated.push('\t'),
            b'u' => {
                let unit = hex_unit(bytes, index)
                    .ok_or(TranslateError::InvalidEscape { offset: escape_offset })?;
                index += 4;
                if (0xdc00..=0xdfff).contains(&unit) {
                    // A low surrogate may not appear first
                    return Err(TranslateError::InvalidSurrogate { offset: escape_offset });
                }
                if (0xd800..=0xdbff).contains(&unit) {
                    // High surrogate must pair with an immediately following \uXXXX low
                    if bytes.get(index) != Some(&b'\\') || bytes.get(index + 1) != Some(&b'u') {
                        return Err(TranslateError::InvalidSurrogate { offset: escape_offset });
                    }
                    let low = hex_unit(bytes, index + 2)
                        .ok_or(TranslateError::InvalidEscape { offset: index })?;
                    if !(0xdc00..=0xdfff).contains(&low) {
                        return Err(TranslateError::InvalidSurrogate { offset: escape_offset });
                    }
                    index += 6;
                    let scalar =
                        0x10000 + ((u32::from(unit) - 0xd800) << 10) + (u32::from(low) - 0xdc00);
                    let character = char::from_u32(scalar)
                        .ok_or(TranslateError::InvalidSurrogate { offset: escape_offset })?;
                    translated.push(character);
                } else {
                    let character = char::from_u32(u32::from(unit))
                        .ok_or(TranslateError::InvalidEscape { offset: escape_offset })?;
                    translated.push(character);
                }
            }
            _ => return Err(TranslateError::InvalidEscape { offset: escape_offset }),
        }
    }
    Ok(translated)
}

/// Escapes a unicode string into JSON string contents using the minimal
/// escape set: `"`, `\` and control characters. With `ascii_only` every
/// non-ASCII scalar is emitted as `\uXXXX` (surrogate pairs above the BMP).
pub fn to_escaped(text: &str, ascii_only: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\u{0008}' => escaped.push_str("\\b"),
            '\u{000c}' => escaped.push_str("\\f"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ if (character as u32) < 0x20 => {
                let _ = write!(escaped, "\\u{:04x}", character as u32);
            }
            _ if ascii_only && !character.is_ascii() => {
                let scalar = character as u32;
                if scalar > 0xffff {
                    let reduced = scalar - 0x10000;
                    let high = 0xd800 + (reduced >> 10);
                    let low = 0xdc00 + (reduced & 0x3ff);
                    let _ = write!(escaped, "\\u{:04x}\\u{:04x}", high, low);
                } else {
                    let _ = write!(escaped, "\\u{:04x}", scalar);
                }
            }
            _ => escaped.push(character),
        }
    }
    escaped
}

fn hex_unit(bytes: &[u8], index: usize) -> Option<u16> {
    if index + 4 > bytes.len() {
        return None;
    }
    let mut unit: u16 = 0;
    for &byte in &bytes[index..index + 4] {
        let digit = (byte as char).to_digit(16)?;
        unit = (unit << 4) | digit as u16;
    }
    Some(unit)
}
