//! Integration tests for DTD validation of parsed documents.

use xml_lib::{ValidatorConfig, parse_str, validate, validate_with_config};

#[test]
fn test_document_without_dtd_validates_trivially() {
    let document = parse_str("<r><anything/></r>").unwrap();
    assert!(validate(&document).is_empty());
}

#[test]
fn test_valid_document_produces_no_errors() {
    let document = parse_str(
        "<!DOCTYPE note [\
         <!ELEMENT note (to,from)>\
         <!ELEMENT to (#PCDATA)>\
         <!ELEMENT from (#PCDATA)>\
         ]><note><to>A</to><from>B</from></note>",
    )
    .unwrap();
    assert!(validate(&document).is_empty());
}

#[test]
fn test_content_model_violation_is_reported_on_the_element() {
    let document = parse_str(
        "<!DOCTYPE r [\
         <!ELEMENT r (a,b)>\
         <!ELEMENT a EMPTY>\
         <!ELEMENT b EMPTY>\
         <!ELEMENT c EMPTY>\
         ]><r><a/><c/></r>",
    )
    .unwrap();
    let errors = validate(&document);
    assert!(
        errors
            .iter()
            .any(|error| error.element == "r" && error.reason.contains("content model")),
        "got: {:?}",
        errors
    );
}

#[test]
fn test_optional_and_repeating_particles_validate() {
    let document = parse_str(
        "<!DOCTYPE r [\
         <!ELEMENT r (a?, b*, c+)>\
         <!ELEMENT a EMPTY>\
         <!ELEMENT b EMPTY>\
         <!ELEMENT c EMPTY>\
         ]><r><b/><b/><c/><c/></r>",
    )
    .unwrap();
    assert!(validate(&document).is_empty());
}

#[test]
fn test_undeclared_element_is_reported() {
    let document = parse_str(
        "<!DOCTYPE r [<!ELEMENT r ANY>]><r><mystery/></r>",
    )
    .unwrap();
    let errors = validate(&document);
    assert!(errors.iter().any(|error| error.element == "mystery"));
}

#[test]
fn test_root_element_must_match_doctype_name() {
    let document = parse_str("<!DOCTYPE note [<!ELEMENT other EMPTY>]><other/>").unwrap();
    let errors = validate(&document);
    assert!(errors.iter().any(|error| error.reason.contains("DOCTYPE")));
}

#[test]
fn test_empty_element_with_content_is_reported() {
    let document = parse_str(
        "<!DOCTYPE r [<!ELEMENT r EMPTY>]><r>text</r>",
    )
    .unwrap();
    let errors = validate(&document);
    assert!(errors.iter().any(|error| error.reason.contains("EMPTY")));
}

#[test]
fn test_empty_element_rejects_whitespace_only_content() {
    let document = parse_str(
        "<!DOCTYPE r [<!ELEMENT r EMPTY>]><r> </r>",
    )
    .unwrap();
    let errors = validate(&document);
    assert!(errors.iter().any(|error| error.reason.contains("EMPTY")));
}

#[test]
fn test_whitespace_in_element_content_is_tolerated_by_default() {
    let document = parse_str(
        "<!DOCTYPE r [\
         <!ELEMENT r (a)>\
         <!ELEMENT a EMPTY>\
         ]><r> <a/> </r>",
    )
    .unwrap();
    assert!(validate(&document).is_empty());
}

#[test]
fn test_preserved_whitespace_in_element_content_is_reported() {
    let document = parse_str(
        "<!DOCTYPE r [\
         <!ELEMENT r (a)>\
         <!ELEMENT a EMPTY>\
         ]><r xml:space=\"preserve\"><a/> </r>",
    )
    .unwrap();
    let errors = validate(&document);
    assert!(
        errors
            .iter()
            .any(|error| error.element == "r" && error.reason.contains("preserve")),
        "got: {:?}",
        errors
    );
}

#[test]
fn test_xml_space_inherits_through_children() {
    let document = parse_str(
        "<!DOCTYPE outer [\
         <!ELEMENT outer (r)>\
         <!ELEMENT r (a)>\
         <!ELEMENT a EMPTY>\
         ]><outer xml:space=\"preserve\"><r><a/> </r></outer>",
    )
    .unwrap();
    let errors = validate(&document);
    assert!(
        errors
            .iter()
            .any(|error| error.element == "r" && error.reason.contains("preserve")),
        "got: {:?}",
        errors
    );
}

#[test]
fn test_xml_space_override_restores_default_handling() {
    let document = parse_str(
        "<!DOCTYPE outer [\
         <!ELEMENT outer (r)>\
         <!ELEMENT r (a)>\
         <!ELEMENT a EMPTY>\
         ]><outer xml:space=\"preserve\"><r xml:space=\"default\"><a/> </r></outer>",
    )
    .unwrap();
    assert!(validate(&document).is_empty());
}

#[test]
fn test_xml_lang_values_are_checked() {
    let document = parse_str(
        "<!DOCTYPE r [<!ELEMENT r EMPTY>]><r xml:lang=\"123\"/>",
    )
    .unwrap();
    let errors = validate(&document);
    assert!(errors.iter().any(|error| error.reason.contains("xml:lang")));

    let document = parse_str(
        "<!DOCTYPE r [<!ELEMENT r EMPTY>]><r xml:lang=\"en-US\"/>",
    )
    .unwrap();
    assert!(validate(&document).is_empty());
}

#[test]
fn test_mixed_content_restricts_element_children() {
    let document = parse_str(
        "<!DOCTYPE p [\
         <!ELEMENT p (#PCDATA | b)*>\
         <!ELEMENT b (#PCDATA)>\
         <!ELEMENT i (#PCDATA)>\
         ]><p>one <b>two</b> <i>three</i></p>",
    )
    .unwrap();
    let errors = validate(&document);
    assert!(
        errors
            .iter()
            .any(|error| error.element == "p" && error.reason.contains("<i>"))
    );
}

#[test]
fn test_required_and_fixed_attributes() {
    let document = parse_str(
        "<!DOCTYPE r [\
         <!ELEMENT r EMPTY>\
         <!ATTLIST r id CDATA #REQUIRED version CDATA #FIXED \"1\">\
         ]><r version=\"2\"/>",
    )
    .unwrap();
    let errors = validate(&document);
    assert!(errors.iter().any(|error| error.reason.contains("required")));
    assert!(errors.iter().any(|error| error.reason.contains("fixed")));
}

#[test]
fn test_undeclared_attribute_is_reported() {
    let document = parse_str(
        "<!DOCTYPE r [<!ELEMENT r EMPTY>]><r stray=\"1\"/>",
    )
    .unwrap();
    let errors = validate(&document);
    assert!(errors.iter().any(|error| error.reason.contains("stray")));
}

#[test]
fn test_enumeration_membership() {
    let document = parse_str(
        "<!DOCTYPE r [\
         <!ELEMENT r EMPTY>\
         <!ATTLIST r kind (alpha|beta) #IMPLIED>\
         ]><r kind=\"gamma\"/>",
    )
    .unwrap();
    let errors = validate(&document);
    assert!(errors.iter().any(|error| error.reason.contains("enumeration")));
}

#[test]
fn test_duplicate_id_values_are_reported() {
    let document = parse_str(
        "<!DOCTYPE r [\
         <!ELEMENT r (item, item)>\
         <!ELEMENT item EMPTY>\
         <!ATTLIST item id ID #REQUIRED>\
         ]><r><item id=\"i1\"/><item id=\"i1\"/></r>",
    )
    .unwrap();
    let errors = validate(&document);
    assert!(errors.iter().any(|error| error.reason.contains("not unique")));
}

#[test]
fn test_idref_must_resolve_globally() {
    let document = parse_str(
        "<!DOCTYPE r [\
         <!ELEMENT r (item, link)>\
         <!ELEMENT item EMPTY>\
         <!ELEMENT link EMPTY>\
         <!ATTLIST item id ID #REQUIRED>\
         <!ATTLIST link ref IDREF #REQUIRED>\
         ]><r><item id=\"i1\"/><link ref=\"i2\"/></r>",
    )
    .unwrap();
    let errors = validate(&document);
    assert!(
        errors
            .iter()
            .any(|error| error.element == "link" && error.reason.contains("i2"))
    );
}

#[test]
fn test_forward_idref_resolves_in_second_pass() {
    let document = parse_str(
        "<!DOCTYPE r [\
         <!ELEMENT r (link, item)>\
         <!ELEMENT item EMPTY>\
         <!ELEMENT link EMPTY>\
         <!ATTLIST item id ID #REQUIRED>\
         <!ATTLIST link ref IDREF #REQUIRED>\
         ]><r><link ref=\"later\"/><item id=\"later\"/></r>",
    )
    .unwrap();
    assert!(validate(&document).is_empty());
}

#[test]
fn test_idrefs_checks_each_token() {
    let document = parse_str(
        "<!DOCTYPE r [\
         <!ELEMENT r (item, link)>\
         <!ELEMENT item EMPTY>\
         <!ELEMENT link EMPTY>\
         <!ATTLIST item id ID #REQUIRED>\
         <!ATTLIST link refs IDREFS #REQUIRED>\
         ]><r><item id=\"a\"/><link refs=\"a missing\"/></r>",
    )
    .unwrap();
    let errors = validate(&document);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].reason.contains("missing"));
}

#[test]
fn test_entity_attribute_must_name_unparsed_entity() {
    let document = parse_str(
        "<!DOCTYPE r [\
         <!ELEMENT r EMPTY>\
         <!NOTATION gif SYSTEM \"image/gif\">\
         <!ENTITY pic SYSTEM \"pic.gif\" NDATA gif>\
         <!ATTLIST r img ENTITY #IMPLIED>\
         ]><r img=\"pic\"/>",
    )
    .unwrap();
    assert!(validate(&document).is_empty());

    let document = parse_str(
        "<!DOCTYPE r [\
         <!ELEMENT r EMPTY>\
         <!ATTLIST r img ENTITY #IMPLIED>\
         ]><r img=\"ghost\"/>",
    )
    .unwrap();
    let errors = validate(&document);
    assert!(errors.iter().any(|error| error.reason.contains("unparsed")));
}

#[test]
fn test_nmtoken_values_are_checked() {
    let document = parse_str(
        "<!DOCTYPE r [\
         <!ELEMENT r EMPTY>\
         <!ATTLIST r token NMTOKEN #IMPLIED>\
         ]><r token=\"has space\"/>",
    )
    .unwrap();
    let errors = validate(&document);
    assert!(errors.iter().any(|error| error.reason.contains("NMTOKEN")));
}

#[test]
fn test_xml_space_values_are_checked() {
    let document = parse_str(
        "<!DOCTYPE r [<!ELEMENT r EMPTY>]><r xml:space=\"sometimes\"/>",
    )
    .unwrap();
    let errors = validate(&document);
    assert!(errors.iter().any(|error| error.reason.contains("xml:space")));
}

#[test]
fn test_fail_fast_stops_at_first_error() {
    let document = parse_str(
        "<!DOCTYPE r [<!ELEMENT r EMPTY>]>\
         <r><u1/><u2/><u3/></r>",
    )
    .unwrap();
    let all = validate(&document);
    assert!(all.len() > 1);
    let config = ValidatorConfig::new().with_fail_fast(true);
    assert_eq!(validate_with_config(&document, &config).len(), 1);
}
