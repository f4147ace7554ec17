//! Default parser implementation for JSON per RFC 8259.
//! Builds a Node tree from a byte source in a single pull-mode pass.

use crate::config::ParserConfig;
use crate::error::{JsonError, Position};
use crate::io::traits::ISource;
use crate::nodes::node::{Node, Numeric};
use crate::translator::{self, TranslateError};

/// Parses JSON data from the given source into a Node structure using
/// default configuration. The top-level value may be of any type.
pub fn parse(source: &mut dyn ISource) -> Result<Node, JsonError> {
    parse_with_config(source, &ParserConfig::new())
}

/// Parses JSON data from the given source into a Node structure.
/// Non-whitespace bytes after the top-level value are an error.
pub fn parse_with_config(
    source: &mut dyn ISource,
    config: &ParserConfig,
) -> Result<Node, JsonError> {
    source.ignore_whitespace();
    if !source.more() {
        return Err(JsonError::EmptyInput);
    }
    let node = parse_value(source, config, 0)?;
    source.ignore_whitespace();
    if source.more() {
        return Err(JsonError::TrailingContent {
            position: source.error_position(),
        });
    }
    Ok(node)
}

/// Parses JSON data from a byte slice into a Node structure.
/// This is a convenience function that creates a BufferSource internally.
pub fn parse_bytes(data: &[u8]) -> Result<Node, JsonError> {
    use crate::io::sources::buffer::Buffer;
    let mut source = Buffer::new(data);
    parse(&mut source)
}

/// Parses JSON data from a string into a Node structure.
/// This is a convenience function that creates a BufferSource internally.
pub fn parse_str(data: &str) -> Result<Node, JsonError> {
    parse_bytes(data.as_bytes())
}

fn parse_value(
    source: &mut dyn ISource,
    config: &ParserConfig,
    depth: usize,
) -> Result<Node, JsonError> {
    if depth > config.max_depth {
        return Err(JsonError::NestingTooDeep {
            position: source.error_position(),
        });
    }
    match source.current() {
        Some(b'{') => parse_object(source, config, depth),
        Some(b'[') => parse_array(source, config, depth),
        Some(b'"') => Ok(Node::Str(parse_string(source)?)),
        Some(b't') => parse_literal(source, b"true", Node::Boolean(true)),
        Some(b'f') => parse_literal(source, b"false", Node::Boolean(false)),
        Some(b'n') => parse_literal(source, b"null", Node::Null),
        Some(b'-') | Some(b'0'..=b'9') => parse_number(source),
        Some(byte) => Err(JsonError::UnexpectedCharacter {
            found: byte as char,
            position: source.error_position(),
        }),
        None => Err(JsonError::BufferExhausted {
            position: source.error_position(),
        }),
    }
}

/// Consumes one of the keyword literals true/false/null atomically.
fn parse_literal(
    source: &mut dyn ISource,
    literal: &'static [u8],
    node: Node,
) -> Result<Node, JsonError> {
    if source.match_bytes(literal) {
        Ok(node)
    } else {
        Err(JsonError::Syntax {
            expected: match literal {
                b"true" => "true",
                b"false" => "false",
                _ => "null",
            },
            position: source.error_position(),
        })
    }
}

/// Parses a number, validating the RFC 8259 grammar while capturing the
/// original lexeme verbatim.
fn parse_number(source: &mut dyn ISource) -> Result<Node, JsonError> {
    let start = source.error_position();
    let mut lexeme = String::new();

    if source.current() == Some(b'-') {
        lexeme.push('-');
        source.next()?;
    }
    // Integer part: a single 0, or a nonzero digit run
    match source.current() {
        Some(b'0') => {
            lexeme.push('0');
            source.next()?;
            if matches!(source.current(), Some(b'0'..=b'9')) {
                return Err(JsonError::InvalidNumber { position: start });
            }
        }
        Some(b'1'..=b'9') => take_digits(source, &mut lexeme),
        _ => return Err(JsonError::InvalidNumber { position: start }),
    }
    // Optional fraction
    if source.current() == Some(b'.') {
        lexeme.push('.');
        source.next()?;
        if !matches!(source.current(), Some(b'0'..=b'9')) {
            return Err(JsonError::InvalidNumber { position: start });
        }
        take_digits(source, &mut lexeme);
    }
    // Optional exponent
    if matches!(source.current(), Some(b'e') | Some(b'E')) {
        lexeme.push(source.current().unwrap_or(b'e') as char);
        source.next()?;
        if matches!(source.current(), Some(b'+') | Some(b'-')) {
            lexeme.push(source.current().unwrap_or(b'+') as char);
            source.next()?;
        }
        if !matches!(source.current(), Some(b'0'..=b'9')) {
            return Err(JsonError::InvalidNumber { position: start });
        }
        take_digits(source, &mut lexeme);
    }
    Ok(Node::Number(Numeric::new(lexeme)))
}

fn take_digits(source: &mut dyn ISource, lexeme: &mut String) {
    while let Some(byte @ b'0'..=b'9') = source.current() {
        lexeme.push(byte as char);
        // current() returned a byte, so next() cannot fail here
        let _ = source.next();
    }
}

/// Parses a string value. The raw contents are collected between the quotes
/// (escape sequences kept intact), decoded as UTF-8, then resolved through
/// the translator so surrogate pairs combine into single scalars.
fn parse_string(source: &mut dyn ISource) -> Result<String, JsonError> {
    let start = source.error_position();
    source.next()?; // skip opening quote
    let mut raw = Vec::new();
    loop {
        match source.current() {
            None => {
                return Err(JsonError::BufferExhausted {
                    position: source.error_position(),
                });
            }
            Some(b'"') => {
                source.next()?;
                break;
            }
            Some(b'\\') => {
                raw.push(b'\\');
                source.next()?;
                match source.current() {
                    Some(byte) => {
                        raw.push(byte);
                        source.next()?;
                    }
                    None => {
                        return Err(JsonError::BufferExhausted {
                            position: source.error_position(),
                        });
                    }
                }
            }
            Some(byte) if byte < 0x20 => {
                return Err(JsonError::Syntax {
                    expected: "escaped control character",
                    position: source.error_position(),
                });
            }
            Some(byte) => {
                raw.push(byte);
                source.next()?;
            }
        }
    }
    let contents = String::from_utf8(raw).map_err(|_| JsonError::InvalidUtf8 { position: start })?;
    translator::from_escaped(&contents).map_err(|error| rebase_translate_error(error, start))
}

/// Maps a translator error, whose offset is local to the string contents,
/// onto the source position of the enclosing string literal. Strings cannot
/// contain raw newlines, so the line is that of the opening quote.
fn rebase_translate_error(error: TranslateError, start: Position) -> JsonError {
    match error {
        TranslateError::InvalidEscape { offset } => JsonError::InvalidEscape {
            position: Position {
                line: start.line,
                column: start.column + 1 + offset,
                offset: start.offset + 1 + offset,
            },
        },
        TranslateError::InvalidSurrogate { offset } => JsonError::InvalidSurrogate {
            position: Position {
                line: start.line,
                column: start.column + 1 + offset,
                offset: start.offset + 1 + offset,
            },
        },
    }
}

/// Parses an object, rejecting duplicate keys and preserving member order.
fn parse_object(
    source: &mut dyn ISource,
    config: &ParserConfig,
    depth: usize,
) -> Result<Node, JsonError> {
    source.next()?; // skip '{'
    source.ignore_whitespace();
    let mut members: Vec<(String, Node)> = Vec::new();
    if source.current() == Some(b'}') {
        source.next()?;
        return Ok(Node::Object(members));
    }
    loop {
        source.ignore_whitespace();
        if source.current() != Some(b'"') {
            return Err(JsonError::Syntax {
                expected: "object key string",
                position: source.error_position(),
            });
        }
        let key_position = source.error_position();
        let key = parse_string(source)?;
        if members.iter().any(|(name, _)| *name == key) {
            return Err(JsonError::DuplicateKey {
                key,
                position: key_position,
            });
        }
        source.ignore_whitespace();
        if source.current() != Some(b':') {
            return Err(JsonError::Syntax {
                expected: "':'",
                position: source.error_position(),
            });
        }
        source.next()?;
        source.ignore_whitespace();
        let value = parse_value(source, config, depth + 1)?;
        members.push((key, value));
        source.ignore_whitespace();
        match source.current() {
            Some(b',') => {
                source.next()?;
            }
            Some(b'}') => {
                source.next()?;
                return Ok(Node::Object(members));
            }
            Some(_) => {
                return Err(JsonError::Syntax {
                    expected: "',' or '}'",
                    position: source.error_position(),
                });
            }
            None => {
                return Err(JsonError::BufferExhausted {
                    position: source.error_position(),
                });
            }
        }
    }
}

/// Parses an array. Trailing commas are rejected because each comma must be
/// followed by a value.
fn parse_array(
    source: &mut dyn ISource,
    config: &ParserConfig,
    depth: usize,
) -> Result<Node, JsonError> {
    source.next()?; // skip '['
    source.ignore_whitespace();
    let mut elements = Vec::new();
    if source.current() == Some(b']') {
        source.next()?;
        return Ok(Node::Array(elements));
    }
    loop {
        source.ignore_whitespace();
        elements.push(parse_value(source, config, depth + 1)?);
        source.ignore_whitespace();
        match source.current() {
            Some(b',') => {
                source.next()?;
            }
            Some(b']') => {
                source.next()?;
                return Ok(Node::Array(elements));
            }
            Some(_) => {
                return Err(JsonError::Syntax {
                    expected: "',' or ']'",
                    position: source.error_position(),
                });
            }
            None => {
                return Err(JsonError::BufferExhausted {
                    position: source.error_position(),
                });
            }
        }
    }
}
