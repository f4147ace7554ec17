//! Default parser implementation for bencode format.
//! Provides functionality to parse bencode-encoded data into Node structures.

use crate::config::ParserConfig;
use crate::error::BencodeError;
use crate::io::traits::ISource;
use crate::nodes::node::Node;
use std::collections::BTreeMap;

/// Start marker for bencode integer values ('i')
/// Format: i<digits>e
const INTEGER_START: u8 = b'i';
/// Start marker for bencode list values ('l')
/// Format: l<bencoded values>e
const LIST_START: u8 = b'l';
/// Start marker for bencode dictionary values ('d')
/// Format: d<bencoded string><bencoded value>...e
const DICT_START: u8 = b'd';
/// End marker for integers, lists and dictionaries ('e')
const VALUE_END: u8 = b'e';
/// Separator between string length and content (':')
/// Format: <length>:<bytes>
const STRING_SEPARATOR: u8 = b':';

/// Parses bencode data from the given source into a Node structure using
/// default configuration.
pub fn parse(source: &mut dyn ISource) -> Result<Node, BencodeError> {
    parse_with_config(source, &ParserConfig::new())
}

/// Parses bencode data from the given source into a Node structure.
/// Handles integers, strings, lists, and dictionaries based on their prefix
/// byte. Trailing bytes after the single top-level value are tolerated
/// unless the configuration rejects them.
pub fn parse_with_config(
    source: &mut dyn ISource,
    config: &ParserConfig,
) -> Result<Node, BencodeError> {
    if !source.more() {
        return Err(BencodeError::EmptyInput);
    }
    let node = parse_value(source, config, 0)?;
    if config.reject_trailing && source.more() {
        return Err(BencodeError::TrailingBytes {
            position: source.error_position(),
        });
    }
    Ok(node)
}

/// Parses bencode data from a byte slice into a Node structure.
/// This is a convenience function that creates a BufferSource internally.
pub fn parse_bytes(data: &[u8]) -> Result<Node, BencodeError> {
    use crate::io::sources::buffer::Buffer;
    let mut source = Buffer::new(data);
    parse(&mut source)
}

/// Parses bencode data from a string into a Node structure.
/// This is a convenience function that creates a BufferSource internally.
pub fn parse_str(data: &str) -> Result<Node, BencodeError> {
    parse_bytes(data.as_bytes())
}

fn parse_value(
    source: &mut dyn ISource,
    config: &ParserConfig,
    depth: usize,
) -> Result<Node, BencodeError> {
    if depth > config.max_depth {
        return Err(BencodeError::NestingTooDeep {
            position: source.error_position(),
        });
    }
    match source.current() {
        Some(INTEGER_START) => parse_integer(source),
        Some(LIST_START) => parse_list(source, config, depth),
        Some(DICT_START) => parse_dictionary(source, config, depth),
        Some(b'0'..=b'9') => Ok(Node::Str(parse_string(source)?)),
        Some(STRING_SEPARATOR) => Err(BencodeError::InvalidStringLength {
            position: source.error_position(),
        }),
        Some(byte) => Err(BencodeError::UnexpectedCharacter {
            found: byte as char,
            position: source.error_position(),
        }),
        None => Err(BencodeError::BufferExhausted {
            position: source.error_position(),
        }),
    }
}

/// Parses an integer value from the source, expecting format 'i<number>e'.
/// Rejects '-0', leading zeros, empty digit runs and values outside i64.
fn parse_integer(source: &mut dyn ISource) -> Result<Node, BencodeError> {
    let start = source.error_position();
    source.next()?; // skip 'i'
    let mut number = String::new();
    while let Some(byte) = source.current() {
        if byte == VALUE_END {
            source.next()?;
            if !valid_integer_lexeme(&number) {
                return Err(BencodeError::InvalidInteger { position: start });
            }
            return number
                .parse::<i64>()
                .map(Node::Integer)
                .map_err(|_| BencodeError::InvalidInteger { position: start });
        }
        number.push(byte as char);
        source.next()?;
    }
    Err(BencodeError::UnterminatedInteger { position: start })
}

/// An integer lexeme is an optional '-' followed by digits, with no leading
/// zero except the literal "0" and no "-0".
fn valid_integer_lexeme(number: &str) -> bool {
    let digits = number.strip_prefix('-').unwrap_or(number);
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return false;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return false;
    }
    // "-0" is not a valid bencode integer
    !(number.starts_with('-') && digits == "0")
}

/// Parses the length prefix of a bencode string, expecting digits followed
/// by ':'. The length has no leading zero except the literal "0".
fn parse_string_length(source: &mut dyn ISource) -> Result<usize, BencodeError> {
    let start = source.error_position();
    let mut length = String::new();
    loop {
        match source.current() {
            Some(STRING_SEPARATOR) => {
                source.next()?;
                break;
            }
            Some(byte) if byte.is_ascii_digit() => {
                length.push(byte as char);
                source.next()?;
            }
            Some(_) => return Err(BencodeError::InvalidStringLength { position: start }),
            None => {
                return Err(BencodeError::BufferExhausted {
                    position: source.error_position(),
                });
            }
        }
    }
    if length.is_empty() || (length.len() > 1 && length.starts_with('0')) {
        return Err(BencodeError::InvalidStringLength { position: start });
    }
    length
        .parse::<usize>()
        .map_err(|_| BencodeError::InvalidStringLength { position: start })
}

/// Parses a string value from the source, expecting format '<length>:<bytes>'.
/// Exactly `length` raw bytes must follow the separator.
fn parse_string(source: &mut dyn ISource) -> Result<Vec<u8>, BencodeError> {
    let expected = parse_string_length(source)?;
    let mut bytes = Vec::with_capacity(expected);
    for _ in 0..expected {
        match source.current() {
            Some(byte) => {
                bytes.push(byte);
                source.next()?;
            }
            None => {
                return Err(BencodeError::StringTooShort {
                    expected,
                    position: source.error_position(),
                });
            }
        }
    }
    Ok(bytes)
}

/// Parses a list from the source, expecting format 'l<elements>e'.
/// Recursively parses all elements until the end marker is found.
fn parse_list(
    source: &mut dyn ISource,
    config: &ParserConfig,
    depth: usize,
) -> Result<Node, BencodeError> {
    let start = source.error_position();
    source.next()?; // skip 'l'
    let mut list = Node::List(vec![]);
    while let Some(byte) = source.current() {
        if byte == VALUE_END {
            source.next()?;
            return Ok(list);
        }
        let element = parse_value(source, config, depth + 1)?;
        list.add_to_list(element)
            .map_err(|_| BencodeError::UnterminatedList { position: start })?;
    }
    Err(BencodeError::UnterminatedList { position: start })
}

/// Parses a dictionary from the source, expecting format 'd<key><value>...e'.
/// Keys must be byte strings in strictly increasing byte-lexicographic order
/// and must be unique.
fn parse_dictionary(
    source: &mut dyn ISource,
    config: &ParserConfig,
    depth: usize,
) -> Result<Node, BencodeError> {
    let start = source.error_position();
    source.next()?; // skip 'd'
    let mut dict = BTreeMap::new();
    let mut last_key: Option<Vec<u8>> = None;
    while let Some(byte) = source.current() {
        if byte == VALUE_END {
            source.next()?;
            return Ok(Node::Dictionary(dict));
        }
        if !byte.is_ascii_digit() {
            return Err(BencodeError::KeyMustBeString {
                position: source.error_position(),
            });
        }
        let key_position = source.error_position();
        let key = parse_string(source)?;
        if let Some(previous) = &last_key {
            if *previous == key {
                return Err(BencodeError::DuplicateKey {
                    key: String::from_utf8_lossy(&key).into_owned(),
                    position: key_position,
                });
            }
            if *previous > key && !config.allow_unordered_keys {
                return Err(BencodeError::UnorderedKey {
                    key: String::from_utf8_lossy(&key).into_owned(),
                    position: key_position,
                });
            }
        }
        last_key = Some(key.clone());
        let value = parse_value(source, config, depth + 1)?;
        // In unordered mode the map itself detects duplicates out of sequence
        if dict.insert(key.clone(), value).is_some() {
            return Err(BencodeError::DuplicateKey {
                key: String::from_utf8_lossy(&key).into_owned(),
                position: key_position,
            });
        }
    }
    Err(BencodeError::UnterminatedDictionary { position: start })
}
