//! Integration tests for stringifying JSON node trees.

use json_lib::{
    BufferDestination, FileDestination, Node, StringifyConfig, make_node, stringify,
    stringify_to_string, stringify_to_string_with_config,
};

#[test]
fn test_stringify_compact_document() {
    let node = make_node([
        ("name", make_node("value")),
        ("count", make_node(3)),
        ("items", make_node([true, false])),
    ]);
    assert_eq!(
        stringify_to_string(&node).unwrap(),
        "{\"name\":\"value\",\"count\":3,\"items\":[true,false]}"
    );
}

#[test]
fn test_stringify_to_buffer_destination() {
    let mut destination = BufferDestination::new();
    stringify(&make_node([1, 2, 3]), &mut destination).unwrap();
    assert_eq!(destination.to_string(), "[1,2,3]");
}

#[test]
fn test_stringify_to_file_destination() {
    let path = "json_stringify_file.json";
    {
        let mut destination = FileDestination::new(path).unwrap();
        stringify(&make_node([("a", 1)]), &mut destination).unwrap();
    }
    assert_eq!(std::fs::read_to_string(path).unwrap(), "{\"a\":1}");
    std::fs::remove_file(path).unwrap();
}

#[test]
fn test_pretty_print_indent_width() {
    let node = make_node([("a", 1)]);
    let two = StringifyConfig::new().with_indent(2);
    let four = StringifyConfig::new().with_indent(4);
    assert_eq!(
        stringify_to_string_with_config(&node, &two).unwrap(),
        "{\n  \"a\": 1\n}"
    );
    assert_eq!(
        stringify_to_string_with_config(&node, &four).unwrap(),
        "{\n    \"a\": 1\n}"
    );
}

#[test]
fn test_pretty_print_empty_containers_stay_inline() {
    let node = make_node([("a", Node::Array(vec![])), ("b", Node::Object(vec![]))]);
    let config = StringifyConfig::new().with_indent(2);
    assert_eq!(
        stringify_to_string_with_config(&node, &config).unwrap(),
        "{\n  \"a\": [],\n  \"b\": {}\n}"
    );
}

#[test]
fn test_stringify_escapes_keys_and_values() {
    let node = make_node([("ke\"y", make_node("va\\lue"))]);
    assert_eq!(
        stringify_to_string(&node).unwrap(),
        "{\"ke\\\"y\":\"va\\\\lue\"}"
    );
}
