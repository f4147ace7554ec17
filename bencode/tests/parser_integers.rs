//! Integration tests for parsing bencode integers.

use bencode_lib::{BencodeError, BufferSource, Node, parse};

#[test]
fn test_parse_zero() {
    let mut source = BufferSource::new(b"i0e");
    assert!(matches!(parse(&mut source), Ok(Node::Integer(0))));
}

#[test]
fn test_parse_positive_integer() {
    let mut source = BufferSource::new(b"i42e");
    assert!(matches!(parse(&mut source), Ok(Node::Integer(42))));
}

#[test]
fn test_parse_negative_integer() {
    let mut source = BufferSource::new(b"i-42e");
    assert!(matches!(parse(&mut source), Ok(Node::Integer(-42))));
}

#[test]
fn test_parse_i64_extremes() {
    let mut source = BufferSource::new(b"i9223372036854775807e");
    assert!(matches!(parse(&mut source), Ok(Node::Integer(i64::MAX))));

    let mut source = BufferSource::new(b"i-9223372036854775808e");
    assert!(matches!(parse(&mut source), Ok(Node::Integer(i64::MIN))));
}

#[test]
fn test_parse_integer_overflow_fails() {
    let mut source = BufferSource::new(b"i9223372036854775808e");
    assert!(matches!(
        parse(&mut source),
        Err(BencodeError::InvalidInteger { .. })
    ));
}

#[test]
fn test_parse_negative_zero_fails() {
    let mut source = BufferSource::new(b"i-0e");
    assert!(matches!(
        parse(&mut source),
        Err(BencodeError::InvalidInteger { .. })
    ));
}

#[test]
fn test_parse_leading_zero_fails() {
    let mut source = BufferSource::new(b"i03e");
    assert!(matches!(
        parse(&mut source),
        Err(BencodeError::InvalidInteger { .. })
    ));
}

#[test]
fn test_parse_empty_integer_fails() {
    let mut source = BufferSource::new(b"ie");
    assert!(matches!(
        parse(&mut source),
        Err(BencodeError::InvalidInteger { .. })
    ));
}

#[test]
fn test_parse_non_numeric_integer_fails() {
    let mut source = BufferSource::new(b"i4x2e");
    assert!(matches!(
        parse(&mut source),
        Err(BencodeError::InvalidInteger { .. })
    ));
}

#[test]
fn test_parse_unterminated_integer_fails() {
    let mut source = BufferSource::new(b"i42");
    assert!(matches!(
        parse(&mut source),
        Err(BencodeError::UnterminatedInteger { .. })
    ));
}
