//! Default parser implementation for XML 1.0 documents.
//!
//! All parsing happens over characters the source has already transcoded
//! and newline-normalized. The result of `parse` is a `Prolog` node
//! packaging the declaration, prolog misc items, the optional DTD, the root
//! element and the epilog in document order.

use crate::config::ParserConfig;
use crate::dtd;
use crate::entity::{self, EntityMapper};
use crate::error::{Position, XmlError};
use crate::io::sources::buffer::Buffer;
use crate::io::traits::ISource;
use crate::nodes::node::{Attribute, XNode, XmlDeclaration};
use crate::parser::core::{expect, parse_name, parse_quoted_literal};
use crate::translator;

/// Parses an XML document from the given source using default configuration.
pub fn parse(source: &mut dyn ISource) -> Result<XNode, XmlError> {
    parse_with_config(source, &ParserConfig::new())
}

/// Parses an XML document from the given source.
pub fn parse_with_config(
    source: &mut dyn ISource,
    config: &ParserConfig,
) -> Result<XNode, XmlError> {
    let declaration = parse_declaration(source)?;
    let mut context = Context {
        entities: EntityMapper::new(),
    };
    let mut children = Vec::new();
    let mut seen_dtd = false;

    // Prolog: misc items and at most one DOCTYPE, then the root element
    loop {
        source.ignore_whitespace();
        if !source.more() {
            return Err(XmlError::syntax(
                "missing root element",
                source.error_position(),
            ));
        }
        let start = source.position();
        if source.match_literal("<!--") {
            children.push(parse_comment(source)?);
        } else if source.match_literal("<!DOCTYPE") {
            if seen_dtd {
                return Err(XmlError::syntax(
                    "multiple DOCTYPE declarations",
                    source.error_position(),
                ));
            }
            seen_dtd = true;
            let mut parsed = dtd::parser::parse_doctype(source, config.load_external_dtd)?;
            parsed.raw = source.get_range(start, source.position());
            context.entities = parsed.entities.clone();
            children.push(XNode::Dtd(Box::new(parsed)));
        } else if source.match_literal("<?") {
            children.push(parse_processing_instruction(source)?);
        } else if source.current() == Some('<') {
            let mut active = Vec::new();
            children.push(parse_element(source, &context, &mut active)?);
            break;
        } else {
            return Err(XmlError::syntax(
                "content not allowed before root element",
                source.error_position(),
            ));
        }
    }

    // Epilog: only misc items may follow the root element
    loop {
        source.ignore_whitespace();
        if !source.more() {
            break;
        }
        if source.match_literal("<!--") {
            children.push(parse_comment(source)?);
        } else if source.match_literal("<?") {
            children.push(parse_processing_instruction(source)?);
        } else {
            return Err(XmlError::syntax(
                "content not allowed after root element",
                source.error_position(),
            ));
        }
    }

    Ok(XNode::Prolog {
        declaration,
        children,
    })
}

/// Parses an XML document from a string.
/// This is a convenience function that creates a BufferSource internally.
pub fn parse_str(data: &str) -> Result<XNode, XmlError> {
    let mut source = Buffer::new(data)?;
    parse(&mut source)
}

/// Parses an XML document from raw bytes, detecting UTF-8 or UTF-16.
/// This is a convenience function that creates a BufferSource internally.
pub fn parse_bytes(data: &[u8]) -> Result<XNode, XmlError> {
    let mut source = Buffer::from_bytes(data)?;
    parse(&mut source)
}

struct Context {
    entities: EntityMapper,
}

/// Parses the optional XML declaration. Attribute order is fixed: version,
/// then encoding, then standalone.
fn parse_declaration(source: &mut dyn ISource) -> Result<XmlDeclaration, XmlError> {
    let mut declaration = XmlDeclaration::default();
    if !source.match_literal("<?xml") {
        return Ok(declaration);
    }
    // "<?xml-stylesheet" and the like are ordinary processing instructions
    if !source.current().is_some_and(|c| c.is_whitespace()) {
        source.backup(5);
        return Ok(declaration);
    }
    source.ignore_whitespace();
    expect(source, "version")?;
    declaration.version = parse_declaration_value(source)?;
    if !declaration.version.starts_with("1.") {
        return Err(XmlError::syntax(
            format!("unsupported XML version \"{}\"", declaration.version),
            source.error_position(),
        ));
    }
    source.ignore_whitespace();
    if source.match_literal("encoding") {
        declaration.encoding = parse_declaration_value(source)?;
        let upper = declaration.encoding.to_ascii_uppercase();
        if upper != "UTF-8" && upper != "UTF-16" {
            return Err(XmlError::syntax(
                format!("unsupported encoding \"{}\"", declaration.encoding),
                source.error_position(),
            ));
        }
        source.ignore_whitespace();
    }
    if source.match_literal("standalone") {
        declaration.standalone = parse_declaration_value(source)?;
        if declaration.standalone != "yes" && declaration.standalone != "no" {
            return Err(XmlError::syntax(
                "standalone must be \"yes\" or \"no\"",
                source.error_position(),
            ));
        }
        source.ignore_whitespace();
    }
    expect(source, "?>")?;
    Ok(declaration)
}

fn parse_declaration_value(source: &mut dyn ISource) -> Result<String, XmlError> {
    source.ignore_whitespace();
    expect(source, "=")?;
    source.ignore_whitespace();
    parse_quoted_literal(source)
}

/// Parses a comment. The leading `<!--` has already been consumed.
fn parse_comment(source: &mut dyn ISource) -> Result<XNode, XmlError> {
    let mut text = String::new();
    loop {
        if source.match_literal("-->") {
            return Ok(XNode::Comment { text });
        }
        if source.match_literal("--") {
            return Err(XmlError::syntax(
                "\"--\" is not allowed within a comment",
                source.error_position(),
            ));
        }
        match source.current() {
            Some(character) => {
                text.push(character);
                source.next()?;
            }
            None => {
                return Err(XmlError::BufferExhausted {
                    position: source.error_position(),
                });
            }
        }
    }
}

/// Parses a processing instruction. The leading `<?` has already been
/// consumed.
fn parse_processing_instruction(source: &mut dyn ISource) -> Result<XNode, XmlError> {
    let target = parse_name(source)?;
    if target.eq_ignore_ascii_case("xml") {
        return Err(XmlError::syntax(
            "processing instruction target \"xml\" is reserved",
            source.error_position(),
        ));
    }
    source.ignore_whitespace();
    let mut instruction = String::new();
    loop {
        if source.match_literal("?>") {
            return Ok(XNode::ProcessingInstruction {
                target,
                instruction,
            });
        }
        match source.current() {
            Some(character) => {
                instruction.push(character);
                source.next()?;
            }
            None => {
                return Err(XmlError::BufferExhausted {
                    position: source.error_position(),
                });
            }
        }
    }
}

/// Parses a CDATA section verbatim. The leading `<![CDATA[` has already
/// been consumed.
fn parse_cdata(source: &mut dyn ISource) -> Result<XNode, XmlError> {
    let mut text = String::new();
    loop {
        if source.match_literal("]]>") {
            return Ok(XNode::Cdata { text });
        }
        match source.current() {
            Some(character) => {
                text.push(character);
                source.next()?;
            }
            None => {
                return Err(XmlError::BufferExhausted {
                    position: source.error_position(),
                });
            }
        }
    }
}

/// Parses an element. The source is positioned at its `<`.
fn parse_element(
    source: &mut dyn ISource,
    context: &Context,
    active: &mut Vec<String>,
) -> Result<XNode, XmlError> {
    source.next()?; // consume '<'
    let name = parse_name(source)?;
    let mut attributes: Vec<Attribute> = Vec::new();
    loop {
        source.ignore_whitespace();
        match source.current() {
            Some('/') => {
                expect(source, "/>")?;
                return Ok(XNode::Element {
                    name,
                    attributes,
                    children: vec![],
                });
            }
            Some('>') => {
                source.next()?;
                break;
            }
            Some(_) => {
                let position = source.error_position();
                let attribute_name = parse_name(source)?;
                source.ignore_whitespace();
                expect(source, "=")?;
                source.ignore_whitespace();
                let value = parse_attribute_value(source, context, active)?;
                if attributes
                    .iter()
                    .any(|attribute| attribute.name == attribute_name)
                {
                    return Err(XmlError::DuplicateAttribute {
                        name: attribute_name,
                        position,
                    });
                }
                attributes.push(Attribute::new(attribute_name, value));
            }
            None => {
                return Err(XmlError::BufferExhausted {
                    position: source.error_position(),
                });
            }
        }
    }
    let children = parse_element_contents(source, context, active, &name)?;
    Ok(XNode::Element {
        name,
        attributes,
        children,
    })
}

/// Parses element content until the matching end tag.
fn parse_element_contents(
    source: &mut dyn ISource,
    context: &Context,
    active: &mut Vec<String>,
    name: &str,
) -> Result<Vec<XNode>, XmlError> {
    let mut accumulator = Accumulator::default();
    loop {
        if source.match_literal("</") {
            let position = source.error_position();
            let end_name = parse_name(source)?;
            source.ignore_whitespace();
            expect(source, ">")?;
            if end_name != name {
                return Err(XmlError::UnbalancedTag {
                    name: end_name,
                    position,
                });
            }
            return Ok(accumulator.finish());
        }
        if !source.more() {
            return Err(XmlError::BufferExhausted {
                position: source.error_position(),
            });
        }
        parse_content_item(source, context, active, &mut accumulator)?;
    }
}

/// Parses the replacement text of a markup-bearing entity as a balanced
/// content fragment.
fn parse_fragment(
    text: &str,
    context: &Context,
    active: &mut Vec<String>,
    position: Position,
) -> Result<Vec<XNode>, XmlError> {
    if text.is_empty() {
        return Ok(vec![]);
    }
    let mut source = Buffer::new(text)?;
    let mut accumulator = Accumulator::default();
    while source.more() {
        if source.match_literal("</") {
            return Err(XmlError::syntax(
                "entity replacement text is not well-formed",
                position,
            ));
        }
        parse_content_item(&mut source, context, active, &mut accumulator)?;
    }
    Ok(accumulator.finish())
}

/// Coalesces character runs into Content nodes between markup children.
#[derive(Default)]
struct Accumulator {
    children: Vec<XNode>,
    text: String,
}

impl Accumulator {
    fn push_char(&mut self, character: char) {
        self.text.push(character);
    }

    fn push_node(&mut self, node: XNode) {
        self.flush();
        self.children.push(node);
    }

    fn extend(&mut self, nodes: Vec<XNode>) {
        self.flush();
        self.children.extend(nodes);
    }

    fn flush(&mut self) {
        if !self.text.is_empty() {
            self.children.push(XNode::Content {
                text: std::mem::take(&mut self.text),
            });
        }
    }

    fn finish(mut self) -> Vec<XNode> {
        self.flush();
        self.children
    }
}

/// Parses one item of element content: markup, a reference, or a character.
fn parse_content_item(
    source: &mut dyn ISource,
    context: &Context,
    active: &mut Vec<String>,
    accumulator: &mut Accumulator,
) -> Result<(), XmlError> {
    if source.match_literal("<!--") {
        accumulator.push_node(parse_comment(source)?);
        return Ok(());
    }
    if source.match_literal("<![CDATA[") {
        accumulator.push_node(parse_cdata(source)?);
        return Ok(());
    }
    if source.match_literal("<?") {
        accumulator.push_node(parse_processing_instruction(source)?);
        return Ok(());
    }
    if source.match_literal("]]>") {
        return Err(XmlError::syntax(
            "\"]]>\" is not allowed in content",
            source.error_position(),
        ));
    }
    match source.current() {
        Some('<') => {
            accumulator.push_node(parse_element(source, context, active)?);
        }
        Some('&') => {
            let position = source.error_position();
            match parse_reference(source)? {
                Reference::Character(character) => accumulator.push_char(character),
                Reference::Entity(entity_name) => {
                    if active.iter().any(|frame| frame == &entity_name) {
                        return Err(XmlError::RecursiveEntity {
                            name: entity_name,
                            position,
                        });
                    }
                    let replacement = context.entities.replacement_text(&entity_name, position)?;
                    if replacement.contains('<') {
                        // Markup in the replacement text: reparse it as a
                        // balanced fragment under the active-entity stack
                        active.push(entity_name);
                        let nodes = parse_fragment(&replacement, context, active, position)?;
                        active.pop();
                        accumulator.extend(nodes);
                    } else {
                        let expansion = context.entities.expand(&entity_name, active, position)?;
                        accumulator.push_node(XNode::EntityReference {
                            reference: format!("&{};", entity_name),
                            expansion,
                        });
                    }
                }
            }
        }
        Some(character) => {
            accumulator.push_char(character);
            source.next()?;
        }
        None => {
            return Err(XmlError::BufferExhausted {
                position: source.error_position(),
            });
        }
    }
    Ok(())
}

enum Reference {
    /// A character reference or predefined entity, folded into content
    Character(char),
    /// A general entity reference by name
    Entity(String),
}

/// Parses `&…;` at the current position.
fn parse_reference(source: &mut dyn ISource) -> Result<Reference, XmlError> {
    let position = source.error_position();
    source.next()?; // consume '&'
    if source.match_literal("#") {
        let hex = source.match_literal("x");
        let mut digits = String::new();
        loop {
            match source.current() {
                Some(';') => {
                    source.next()?;
                    break;
                }
                Some(character) if character.is_ascii_alphanumeric() => {
                    digits.push(character);
                    source.next()?;
                }
                Some(_) | None => {
                    return Err(XmlError::InvalidCharacterReference { position });
                }
            }
        }
        return translator::decode_char_ref(&digits, hex)
            .map(Reference::Character)
            .ok_or(XmlError::InvalidCharacterReference { position });
    }
    let name = parse_name(source)?;
    expect(source, ";")?;
    match entity::predefined(&name) {
        Some(character) => Ok(Reference::Character(character)),
        None => Ok(Reference::Entity(name)),
    }
}

/// Parses a quoted attribute value, expanding references. A literal `<` is
/// forbidden, directly or via entity expansion; `&#60;` is permitted.
fn parse_attribute_value(
    source: &mut dyn ISource,
    context: &Context,
    active: &mut Vec<String>,
) -> Result<String, XmlError> {
    let quote = match source.current() {
        Some(quote @ ('"' | '\'')) => quote,
        _ => {
            return Err(XmlError::syntax(
                "expected quoted attribute value",
                source.error_position(),
            ));
        }
    };
    source.next()?;
    let mut value = String::new();
    loop {
        match source.current() {
            Some(character) if character == quote => {
                source.next()?;
                return Ok(value);
            }
            Some('<') => {
                return Err(XmlError::syntax(
                    "'<' is not allowed in an attribute value",
                    source.error_position(),
                ));
            }
            Some('&') => {
                let position = source.error_position();
                match parse_reference(source)? {
                    Reference::Character(character) => value.push(character),
                    Reference::Entity(entity_name) => {
                        let expansion =
                            context.entities.expand(&entity_name, active, position)?;
                        if expansion.contains('<') {
                            return Err(XmlError::syntax(
                                "entity expansion brings '<' into an attribute value",
                                position,
                            ));
                        }
                        value.push_str(&expansion);
                    }
                }
            }
            Some(character) => {
                value.push(character);
                source.next()?;
            }
            None => {
                return Err(XmlError::BufferExhausted {
                    position: source.error_position(),
                });
            }
        }
    }
}
