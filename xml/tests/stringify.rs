//! Integration tests for stringifying parsed documents.

use pretty_assertions::assert_eq;
use xml_lib::{parse_str, stringify_to_string};

fn roundtrip(text: &str) -> String {
    stringify_to_string(&parse_str(text).unwrap()).unwrap()
}

const DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>";

#[test]
fn test_simple_document_roundtrips_identically() {
    let text = format!("{}<r a=\"1\"><c>text</c></r>", DECL);
    assert_eq!(roundtrip(&text), text);
}

#[test]
fn test_declaration_is_supplied_when_absent() {
    assert_eq!(roundtrip("<r/>"), format!("{}<r/>", DECL));
}

#[test]
fn test_explicit_empty_element_normalizes_to_self_closing() {
    assert_eq!(
        roundtrip("<r><a/><a></a></r>"),
        format!("{}<r><a/><a/></r>", DECL)
    );
}

#[test]
fn test_content_escapes_reencode() {
    let text = format!("{}<r>1 &lt; 2 &amp; 3</r>", DECL);
    assert_eq!(roundtrip(&text), text);
}

#[test]
fn test_cdata_comment_and_pi_reencode_verbatim() {
    let text = format!(
        "{}<!--lead--><r><![CDATA[a < b]]><?app run fast?></r>",
        DECL
    );
    assert_eq!(roundtrip(&text), text);
}

#[test]
fn test_dtd_reencodes_verbatim() {
    let text = format!(
        "{}<!DOCTYPE r [<!ELEMENT r (#PCDATA)> <!ENTITY e \"v\">]><r>x</r>",
        DECL
    );
    assert_eq!(roundtrip(&text), text);
}

#[test]
fn test_entity_references_reencode_as_references() {
    let text = format!(
        "{}<!DOCTYPE r [<!ENTITY who \"world\">]><r>hello &who;</r>",
        DECL
    );
    assert_eq!(roundtrip(&text), text);
}

#[test]
fn test_attribute_quotes_normalize_to_double() {
    assert_eq!(
        roundtrip("<r a='x' b=\"y\"/>"),
        format!("{}<r a=\"x\" b=\"y\"/>", DECL)
    );
}

#[test]
fn test_reparse_of_reencoding_is_identity() {
    let text = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
                <!DOCTYPE r [<!ELEMENT r ANY>]>\
                <r a=\"1\"><c>x</c><![CDATA[raw]]><!--n--></r><?tail pi?>";
    let first = parse_str(text).unwrap();
    let reencoded = stringify_to_string(&first).unwrap();
    let second = parse_str(&reencoded).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_stringify_to_file_destination() {
    use xml_lib::{FileDestination, stringify};
    let path = "xml_stringify_file.xml";
    let document = parse_str("<r/>").unwrap();
    {
        let mut destination = FileDestination::new(path).unwrap();
        stringify(&document, &mut destination).unwrap();
    }
    assert_eq!(
        std::fs::read_to_string(path).unwrap(),
        format!("{}<r/>", DECL)
    );
    std::fs::remove_file(path).unwrap();
}
