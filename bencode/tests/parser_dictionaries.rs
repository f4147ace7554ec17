//! Integration tests for parsing bencode dictionaries.

use bencode_lib::{BencodeError, BufferSource, Node, ParserConfig, parse, parse_with_config};

#[test]
fn test_empty_dictionary_works() {
    let mut source = BufferSource::new(b"de");
    match parse(&mut source) {
        Ok(Node::Dictionary(dict)) => assert!(dict.is_empty()),
        other => panic!("Expected empty dictionary, got {:?}", other),
    }
}

#[test]
fn test_single_entry_dictionary() {
    let mut source = BufferSource::new(b"d3:keyi42ee");
    let node = parse(&mut source).unwrap();
    assert_eq!(node.get(b"key"), Some(&Node::Integer(42)));
}

#[test]
fn test_ordered_dictionary() {
    let mut source = BufferSource::new(b"d3:bari1e3:fooi2ee");
    let node = parse(&mut source).unwrap();
    assert_eq!(node.get(b"bar"), Some(&Node::Integer(1)));
    assert_eq!(node.get(b"foo"), Some(&Node::Integer(2)));
}

#[test]
fn test_nested_dictionary() {
    let mut source = BufferSource::new(b"d4:key1d4:key25:valueee");
    let node = parse(&mut source).unwrap();
    let inner = node.get(b"key1").unwrap();
    assert_eq!(inner.get(b"key2"), Some(&Node::Str(b"value".to_vec())));
}

#[test]
fn test_dictionary_with_non_string_key_fails() {
    let mut source = BufferSource::new(b"di32ei42ee");
    assert!(matches!(
        parse(&mut source),
        Err(BencodeError::KeyMustBeString { .. })
    ));
}

#[test]
fn test_dictionary_with_unordered_keys_fails() {
    let mut source = BufferSource::new(b"d3:bbci32e3:abci42ee");
    assert!(matches!(
        parse(&mut source),
        Err(BencodeError::UnorderedKey { key, .. }) if key == "abc"
    ));
}

#[test]
fn test_dictionary_with_duplicate_keys_fails() {
    let mut source = BufferSource::new(b"d3:abci1e3:abci2ee");
    assert!(matches!(
        parse(&mut source),
        Err(BencodeError::DuplicateKey { key, .. }) if key == "abc"
    ));
}

#[test]
fn test_unordered_keys_accepted_with_config() {
    let mut source = BufferSource::new(b"d3:fooi2e3:bari1ee");
    let config = ParserConfig::new().with_allow_unordered_keys(true);
    let node = parse_with_config(&mut source, &config).unwrap();
    assert_eq!(node.get(b"foo"), Some(&Node::Integer(2)));
    assert_eq!(node.get(b"bar"), Some(&Node::Integer(1)));
}

#[test]
fn test_duplicate_keys_rejected_even_when_unordered_allowed() {
    let mut source = BufferSource::new(b"d3:fooi2e3:bari1e3:fooi3ee");
    let config = ParserConfig::new().with_allow_unordered_keys(true);
    assert!(matches!(
        parse_with_config(&mut source, &config),
        Err(BencodeError::DuplicateKey { key, .. }) if key == "foo"
    ));
}

#[test]
fn test_unterminated_dictionary_fails() {
    let mut source = BufferSource::new(b"d3:keyi42e");
    assert!(matches!(
        parse(&mut source),
        Err(BencodeError::UnterminatedDictionary { .. })
    ));
}

#[test]
fn test_dictionary_missing_value_fails() {
    let mut source = BufferSource::new(b"d3:keye");
    assert!(matches!(parse(&mut source), Err(_)));
}
