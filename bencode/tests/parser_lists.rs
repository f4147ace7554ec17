//! Integration tests for parsing bencode lists.

use bencode_lib::{BencodeError, BufferSource, Node, parse};

#[test]
fn test_parse_empty_list() {
    let mut source = BufferSource::new(b"le");
    assert!(matches!(parse(&mut source), Ok(Node::List(list)) if list.is_empty()));
}

#[test]
fn test_parse_list_of_integers() {
    let mut source = BufferSource::new(b"li1ei2ei3ee");
    match parse(&mut source) {
        Ok(Node::List(list)) => {
            assert_eq!(
                list,
                vec![Node::Integer(1), Node::Integer(2), Node::Integer(3)]
            );
        }
        other => panic!("Expected list, got {:?}", other),
    }
}

#[test]
fn test_parse_mixed_list() {
    let mut source = BufferSource::new(b"li32e4:teste");
    match parse(&mut source) {
        Ok(Node::List(list)) => {
            assert_eq!(list.len(), 2);
            assert_eq!(list[0], Node::Integer(32));
            assert_eq!(list[1], Node::Str(b"test".to_vec()));
        }
        other => panic!("Expected list, got {:?}", other),
    }
}

#[test]
fn test_parse_nested_lists() {
    let mut source = BufferSource::new(b"lli1eeli2eee");
    match parse(&mut source) {
        Ok(Node::List(list)) => {
            assert_eq!(list.len(), 2);
            assert_eq!(list[0], Node::List(vec![Node::Integer(1)]));
            assert_eq!(list[1], Node::List(vec![Node::Integer(2)]));
        }
        other => panic!("Expected list, got {:?}", other),
    }
}

#[test]
fn test_parse_unterminated_list_fails() {
    let mut source = BufferSource::new(b"li1e");
    assert!(matches!(
        parse(&mut source),
        Err(BencodeError::UnterminatedList { .. })
    ));
}

#[test]
fn test_parse_list_with_invalid_element_fails() {
    let mut source = BufferSource::new(b"li-0ee");
    assert!(matches!(
        parse(&mut source),
        Err(BencodeError::InvalidInteger { .. })
    ));
}
