//! Integration tests for parsing JSON scalar values and arrays.

use json_lib::{BufferSource, JsonError, Node, parse, parse_str};

#[test]
fn test_parse_top_level_scalars() {
    assert_eq!(parse_str("null").unwrap(), Node::Null);
    assert_eq!(parse_str("true").unwrap(), Node::Boolean(true));
    assert_eq!(parse_str("false").unwrap(), Node::Boolean(false));
    assert_eq!(parse_str("\"text\"").unwrap(), Node::Str("text".to_string()));
    assert_eq!(parse_str("42").unwrap().as_number().unwrap().as_i64(), Some(42));
}

#[test]
fn test_parse_with_surrounding_whitespace() {
    assert_eq!(parse_str(" \t\r\n true \n").unwrap(), Node::Boolean(true));
}

#[test]
fn test_parse_empty_array() {
    assert_eq!(parse_str("[]").unwrap(), Node::Array(vec![]));
    assert_eq!(parse_str("[ \n ]").unwrap(), Node::Array(vec![]));
}

#[test]
fn test_parse_mixed_array() {
    let node = parse_str("[1, \"two\", true, null]").unwrap();
    let elements = node.as_array().unwrap();
    assert_eq!(elements.len(), 4);
    assert_eq!(elements[1], Node::Str("two".to_string()));
    assert_eq!(elements[3], Node::Null);
}

#[test]
fn test_parse_nested_arrays() {
    let node = parse_str("[[1],[2,[3]]]").unwrap();
    let elements = node.as_array().unwrap();
    assert_eq!(elements[0].as_array().unwrap().len(), 1);
    assert_eq!(elements[1].as_array().unwrap()[1].as_array().unwrap().len(), 1);
}

#[test]
fn test_parse_from_buffer_source() {
    let mut source = BufferSource::new(b"[1,2]");
    let node = parse(&mut source).unwrap();
    assert_eq!(node.len(), 2);
}

#[test]
fn test_parse_unterminated_array_fails() {
    assert!(matches!(
        parse_str("[1,2"),
        Err(JsonError::BufferExhausted { .. })
    ));
}

#[test]
fn test_parse_array_missing_comma_fails() {
    assert!(matches!(
        parse_str("[1 2]"),
        Err(JsonError::Syntax { expected: "',' or ']'", .. })
    ));
}
