//! Integration tests for parser error handling and diagnostics.

use bencode_lib::{BencodeError, BufferSource, parse};

#[test]
fn test_empty_input() {
    let mut source = BufferSource::new(b"");
    assert!(matches!(parse(&mut source), Err(BencodeError::EmptyInput)));
}

#[test]
fn test_invalid_leading_character() {
    let mut source = BufferSource::new(b"x123");
    assert!(matches!(
        parse(&mut source),
        Err(BencodeError::UnexpectedCharacter { found: 'x', .. })
    ));
}

#[test]
fn test_error_positions_point_at_offending_token() {
    // The bad integer starts at offset 4
    let mut source = BufferSource::new(b"li1ei-0ee");
    match parse(&mut source) {
        Err(BencodeError::InvalidInteger { position }) => {
            assert_eq!(position.offset, 4);
            assert_eq!(position.line, 1);
            assert_eq!(position.column, 5);
        }
        other => panic!("Expected invalid integer error, got {:?}", other),
    }
}

#[test]
fn test_duplicate_key_position_is_second_key() {
    let mut source = BufferSource::new(b"d3:abci1e3:abci2ee");
    match parse(&mut source) {
        Err(BencodeError::DuplicateKey { position, .. }) => {
            assert_eq!(position.offset, 9);
        }
        other => panic!("Expected duplicate key error, got {:?}", other),
    }
}

#[test]
fn test_exhaustion_mid_token_is_distinguished_from_syntax() {
    // Cut off inside the string length prefix
    let mut source = BufferSource::new(b"12");
    assert!(matches!(
        parse(&mut source),
        Err(BencodeError::BufferExhausted { .. })
    ));

    // Bad length prefix is a syntax error instead
    let mut source = BufferSource::new(b"1x:a");
    assert!(matches!(
        parse(&mut source),
        Err(BencodeError::InvalidStringLength { .. })
    ));
}

#[test]
fn test_errors_format_with_position() {
    let mut source = BufferSource::new(b"i-0e");
    let message = parse(&mut source).unwrap_err().to_string();
    assert!(message.contains("invalid integer"));
    assert!(message.contains("offset 0"));
}
