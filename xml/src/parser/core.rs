//! Low-level parsing helpers shared by the document and DTD parsers.

use crate::error::XmlError;
use crate::io::traits::ISource;
use crate::translator::{is_name_char, is_name_start_char};

/// Parses an XML Name at the current position.
pub(crate) fn parse_name(source: &mut dyn ISource) -> Result<String, XmlError> {
    let mut name = String::new();
    match source.current() {
        Some(character) if is_name_start_char(character) => {
            name.push(character);
            source.next()?;
        }
        Some(character) => {
            return Err(XmlError::syntax(
                format!("invalid name start character '{}'", character),
                source.error_position(),
            ));
        }
        None => {
            return Err(XmlError::BufferExhausted {
                position: source.error_position(),
            });
        }
    }
    while let Some(character) = source.current() {
        if !is_name_char(character) {
            break;
        }
        name.push(character);
        source.next()?;
    }
    Ok(name)
}

/// Parses a quoted literal (single or double quotes) without interpreting
/// its contents. Used for system/public identifiers, declaration values and
/// DTD literals.
pub(crate) fn parse_quoted_literal(source: &mut dyn ISource) -> Result<String, XmlError> {
    let quote = match source.current() {
        Some(quote @ ('"' | '\'')) => quote,
        Some(character) => {
            return Err(XmlError::syntax(
                format!("expected quoted literal, found '{}'", character),
                source.error_position(),
            ));
        }
        None => {
            return Err(XmlError::BufferExhausted {
                position: source.error_position(),
            });
        }
    };
    source.next()?;
    let mut literal = String::new();
    loop {
        match source.current() {
            Some(character) if character == quote => {
                source.next()?;
                return Ok(literal);
            }
            Some(character) => {
                literal.push(character);
                source.next()?;
            }
            None => {
                return Err(XmlError::BufferExhausted {
                    position: source.error_position(),
                });
            }
        }
    }
}

/// Consumes `literal` or fails with a syntax error naming it.
pub(crate) fn expect(source: &mut dyn ISource, literal: &str) -> Result<(), XmlError> {
    if source.match_literal(literal) {
        Ok(())
    } else {
        Err(XmlError::syntax(
            format!("expected \"{}\"", literal),
            source.error_position(),
        ))
    }
}

/// Requires at least one whitespace character, then skips the rest.
pub(crate) fn require_whitespace(source: &mut dyn ISource) -> Result<(), XmlError> {
    if !source.current().is_some_and(|c| c.is_whitespace()) {
        return Err(XmlError::syntax(
            "expected whitespace",
            source.error_position(),
        ));
    }
    source.ignore_whitespace();
    Ok(())
}
