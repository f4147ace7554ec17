//! Parser for document type declarations.
//!
//! Parses `<!DOCTYPE name ExternalID? [ intSubset ]? >` into the structured
//! model. Parameter entity references are recognized only here; the external
//! subset, when present and loading is enabled, is fetched through a file
//! source by its system identifier and parsed with the same declaration loop.

use super::{
    AttributeDecl, AttributeDefault, AttributeType, ContentParticle, ContentSpec, Dtd, ElementDecl,
    ExternalId, Occurrence, ParticleTerm,
};
use crate::entity::EntityDefinition;
use crate::error::XmlError;
use crate::io::sources::buffer::Buffer;
use crate::io::traits::ISource;
use crate::parser::core::{expect, parse_name, parse_quoted_literal, require_whitespace};

/// Parses a document type declaration. The leading `<!DOCTYPE` has already
/// been consumed. The verbatim text is filled in by the caller, which knows
/// the source range the declaration spans.
pub(crate) fn parse_doctype(
    source: &mut dyn ISource,
    load_external: bool,
) -> Result<Dtd, XmlError> {
    let mut dtd = Dtd::default();
    require_whitespace(source)?;
    dtd.name = parse_name(source)?;
    source.ignore_whitespace();
    dtd.external = parse_external_id(source)?;
    source.ignore_whitespace();
    if source.match_literal("[") {
        parse_markup_declarations(source, &mut dtd, true)?;
        source.ignore_whitespace();
    }
    expect(source, ">")?;
    if load_external {
        if let Some(external) = dtd.external.clone() {
            let text = std::fs::read_to_string(&external.system)?;
            if !text.trim().is_empty() {
                let mut subset = Buffer::new(&text)?;
                parse_markup_declarations(&mut subset, &mut dtd, false)?;
            }
        }
    }
    Ok(dtd)
}

/// Parses `SYSTEM "…"` or `PUBLIC "…" "…"` when present.
fn parse_external_id(source: &mut dyn ISource) -> Result<Option<ExternalId>, XmlError> {
    if source.match_literal("SYSTEM") {
        require_whitespace(source)?;
        let system = parse_quoted_literal(source)?;
        return Ok(Some(ExternalId {
            system,
            public: None,
        }));
    }
    if source.match_literal("PUBLIC") {
        require_whitespace(source)?;
        let public = parse_quoted_literal(source)?;
        require_whitespace(source)?;
        let system = parse_quoted_literal(source)?;
        return Ok(Some(ExternalId {
            system,
            public: Some(public),
        }));
    }
    Ok(None)
}

/// Parses a run of markup declarations: the internal subset (terminated by
/// `]`) or an external/parameter-entity fragment (terminated by end of
/// input).
fn parse_markup_declarations(
    source: &mut dyn ISource,
    dtd: &mut Dtd,
    internal_subset: bool,
) -> Result<(), XmlError> {
    loop {
        source.ignore_whitespace();
        if internal_subset {
            if source.match_literal("]") {
                return Ok(());
            }
        } else if !source.more() {
            return Ok(());
        }
        if source.match_literal("<!ELEMENT") {
            parse_element_decl(source, dtd)?;
        } else if source.match_literal("<!ATTLIST") {
            parse_attlist_decl(source, dtd)?;
        } else if source.match_literal("<!ENTITY") {
            parse_entity_decl(source, dtd)?;
        } else if source.match_literal("<!NOTATION") {
            parse_notation_decl(source, dtd)?;
        } else if source.match_literal("<!--") {
            skip_comment(source)?;
        } else if source.match_literal("<?") {
            skip_processing_instruction(source)?;
        } else if source.match_literal("%") {
            parse_parameter_reference(source, dtd)?;
        } else if source.more() {
            return Err(XmlError::syntax(
                "invalid markup declaration",
                source.error_position(),
            ));
        } else {
            return Err(XmlError::BufferExhausted {
                position: source.error_position(),
            });
        }
    }
}

/// Expands `%name;` and parses its replacement text as declarations.
fn parse_parameter_reference(source: &mut dyn ISource, dtd: &mut Dtd) -> Result<(), XmlError> {
    let position = source.error_position();
    let name = parse_name(source)?;
    expect(source, ";")?;
    let replacement = dtd.entities.parameter_replacement_text(&name, position)?;
    if !replacement.trim().is_empty() {
        let mut fragment = Buffer::new(&replacement)?;
        parse_markup_declarations(&mut fragment, dtd, false)?;
    }
    Ok(())
}

/// `<!ELEMENT name content-spec>`
fn parse_element_decl(source: &mut dyn ISource, dtd: &mut Dtd) -> Result<(), XmlError> {
    require_whitespace(source)?;
    let name = parse_name(source)?;
    require_whitespace(source)?;
    let content = parse_content_spec(source)?;
    source.ignore_whitespace();
    expect(source, ">")?;
    // The first declaration of an element name is binding
    dtd.elements
        .entry(name.clone())
        .or_insert(ElementDecl { name, content });
    Ok(())
}

fn parse_content_spec(source: &mut dyn ISource) -> Result<ContentSpec, XmlError> {
    if source.match_literal("EMPTY") {
        return Ok(ContentSpec::Empty);
    }
    if source.match_literal("ANY") {
        return Ok(ContentSpec::Any);
    }
    expect(source, "(")?;
    source.ignore_whitespace();
    if source.match_literal("#PCDATA") {
        return parse_mixed_names(source);
    }
    Ok(ContentSpec::Children(parse_group_body(source)?))
}

/// The tail of `(#PCDATA | name | …)*` after `#PCDATA`.
fn parse_mixed_names(source: &mut dyn ISource) -> Result<ContentSpec, XmlError> {
    let mut names = Vec::new();
    loop {
        source.ignore_whitespace();
        if source.match_literal(")") {
            // The trailing '*' is required when names are listed
            if !source.match_literal("*") && !names.is_empty() {
                return Err(XmlError::syntax(
                    "mixed content with element names must end with \")*\"",
                    source.error_position(),
                ));
            }
            return Ok(ContentSpec::Mixed(names));
        }
        expect(source, "|")?;
        source.ignore_whitespace();
        names.push(parse_name(source)?);
    }
}

/// A content particle: a name or a parenthesized group, with its occurrence.
fn parse_content_particle(source: &mut dyn ISource) -> Result<ContentParticle, XmlError> {
    if source.match_literal("(") {
        source.ignore_whitespace();
        parse_group_body(source)
    } else {
        let name = parse_name(source)?;
        let occurrence = parse_occurrence(source);
        Ok(ContentParticle::new(ParticleTerm::Name(name), occurrence))
    }
}

/// The body of a group whose `(` is already consumed: particles joined by
/// all `|` (choice) or all `,` (sequence), then `)` and an occurrence.
fn parse_group_body(source: &mut dyn ISource) -> Result<ContentParticle, XmlError> {
    let mut parts = vec![parse_content_particle(source)?];
    let mut separator: Option<char> = None;
    loop {
        source.ignore_whitespace();
        match source.current() {
            Some(')') => {
                source.next()?;
                break;
            }
            Some(found @ ('|' | ',')) => {
                if separator.is_some_and(|used| used != found) {
                    return Err(XmlError::syntax(
                        "content group mixes ',' and '|' separators",
                        source.error_position(),
                    ));
                }
                separator = Some(found);
                source.next()?;
                source.ignore_whitespace();
                parts.push(parse_content_particle(source)?);
            }
            Some(found) => {
                return Err(XmlError::syntax(
                    format!("unexpected '{}' in content model", found),
                    source.error_position(),
                ));
            }
            None => {
                return Err(XmlError::BufferExhausted {
                    position: source.error_position(),
                });
            }
        }
    }
    let occurrence = parse_occurrence(source);
    let term = match separator {
        Some('|') => ParticleTerm::Choice(parts),
        _ => ParticleTerm::Seq(parts),
    };
    Ok(ContentParticle::new(term, occurrence))
}

fn parse_occurrence(source: &mut dyn ISource) -> Occurrence {
    let occurrence = match source.current() {
        Some('?') => Occurrence::Optional,
        Some('*') => Occurrence::ZeroOrMore,
        Some('+') => Occurrence::OneOrMore,
        _ => return Occurrence::Once,
    };
    let _ = source.next();
    occurrence
}

/// `<!ATTLIST element (name type default)*>`
fn parse_attlist_decl(source: &mut dyn ISource, dtd: &mut Dtd) -> Result<(), XmlError> {
    require_whitespace(source)?;
    let element = parse_name(source)?;
    loop {
        source.ignore_whitespace();
        if source.match_literal(">") {
            return Ok(());
        }
        let name = parse_name(source)?;
        require_whitespace(source)?;
        let attribute_type = parse_attribute_type(source)?;
        require_whitespace(source)?;
        let default = parse_attribute_default(source)?;
        let declarations = dtd.attributes.entry(element.clone()).or_default();
        // The first declaration of an attribute name is binding
        if !declarations.iter().any(|decl| decl.name == name) {
            declarations.push(AttributeDecl {
                name,
                attribute_type,
                default,
            });
        }
    }
}

fn parse_attribute_type(source: &mut dyn ISource) -> Result<AttributeType, XmlError> {
    // Longest keywords first so e.g. IDREFS is not read as ID + "REFS"
    if source.match_literal("CDATA") {
        return Ok(AttributeType::CData);
    }
    if source.match_literal("IDREFS") {
        return Ok(AttributeType::IdRefs);
    }
    if source.match_literal("IDREF") {
        return Ok(AttributeType::IdRef);
    }
    if source.match_literal("ID") {
        return Ok(AttributeType::Id);
    }
    if source.match_literal("ENTITIES") {
        return Ok(AttributeType::Entities);
    }
    if source.match_literal("ENTITY") {
        return Ok(AttributeType::Entity);
    }
    if source.match_literal("NMTOKENS") {
        return Ok(AttributeType::NmTokens);
    }
    if source.match_literal("NMTOKEN") {
        return Ok(AttributeType::NmToken);
    }
    if source.match_literal("NOTATION") {
        require_whitespace(source)?;
        return Ok(AttributeType::Notation(parse_name_group(source)?));
    }
    if source.current() == Some('(') {
        return Ok(AttributeType::Enumeration(parse_name_group(source)?));
    }
    Err(XmlError::syntax(
        "invalid attribute type",
        source.error_position(),
    ))
}

/// `( name | name | … )`
fn parse_name_group(source: &mut dyn ISource) -> Result<Vec<String>, XmlError> {
    expect(source, "(")?;
    let mut names = Vec::new();
    loop {
        source.ignore_whitespace();
        names.push(parse_name(source)?);
        source.ignore_whitespace();
        match source.current() {
            Some('|') => {
                source.next()?;
            }
            Some(')') => {
                source.next()?;
                return Ok(names);
            }
            Some(found) => {
                return Err(XmlError::syntax(
                    format!("unexpected '{}' in name group", found),
                    source.error_position(),
                ));
            }
            None => {
                return Err(XmlError::BufferExhausted {
                    position: source.error_position(),
                });
            }
        }
    }
}

fn parse_attribute_default(source: &mut dyn ISource) -> Result<AttributeDefault, XmlError> {
    if source.match_literal("#REQUIRED") {
        return Ok(AttributeDefault::Required);
    }
    if source.match_literal("#IMPLIED") {
        return Ok(AttributeDefault::Implied);
    }
    if source.match_literal("#FIXED") {
        require_whitespace(source)?;
        return Ok(AttributeDefault::Fixed(parse_quoted_literal(source)?));
    }
    Ok(AttributeDefault::Value(parse_quoted_literal(source)?))
}

/// `<!ENTITY name …>` (general) or `<!ENTITY % name …>` (parameter)
fn parse_entity_decl(source: &mut dyn ISource, dtd: &mut Dtd) -> Result<(), XmlError> {
    require_whitespace(source)?;
    let parameter = source.match_literal("%");
    if parameter {
        require_whitespace(source)?;
    }
    let name = parse_name(source)?;
    require_whitespace(source)?;

    let definition = if matches!(source.current(), Some('"' | '\'')) {
        EntityDefinition::Internal(parse_quoted_literal(source)?)
    } else {
        let external = parse_external_id(source)?.ok_or_else(|| {
            XmlError::syntax("expected entity value or external id", source.error_position())
        })?;
        let mut notation = None;
        if !parameter {
            source.ignore_whitespace();
            if source.match_literal("NDATA") {
                require_whitespace(source)?;
                notation = Some(parse_name(source)?);
            }
        }
        match notation {
            Some(notation) => EntityDefinition::Unparsed {
                system: external.system,
                public: external.public,
                notation,
            },
            None => EntityDefinition::External {
                system: external.system,
                public: external.public,
            },
        }
    };
    source.ignore_whitespace();
    expect(source, ">")?;
    if parameter {
        dtd.entities.add_parameter(&name, definition);
    } else {
        dtd.entities.add_general(&name, definition);
    }
    Ok(())
}

/// `<!NOTATION name SYSTEM … | PUBLIC …>`
fn parse_notation_decl(source: &mut dyn ISource, dtd: &mut Dtd) -> Result<(), XmlError> {
    require_whitespace(source)?;
    let name = parse_name(source)?;
    require_whitespace(source)?;
    let external = if source.match_literal("SYSTEM") {
        require_whitespace(source)?;
        ExternalId {
            system: parse_quoted_literal(source)?,
            public: None,
        }
    } else if source.match_literal("PUBLIC") {
        require_whitespace(source)?;
        let public = parse_quoted_literal(source)?;
        source.ignore_whitespace();
        // The system literal is optional for notations
        let system = if matches!(source.current(), Some('"' | '\'')) {
            parse_quoted_literal(source)?
        } else {
            String::new()
        };
        ExternalId {
            system,
            public: Some(public),
        }
    } else {
        return Err(XmlError::syntax(
            "expected SYSTEM or PUBLIC in notation declaration",
            source.error_position(),
        ));
    };
    source.ignore_whitespace();
    expect(source, ">")?;
    dtd.notations.entry(name).or_insert(external);
    Ok(())
}

fn skip_comment(source: &mut dyn ISource) -> Result<(), XmlError> {
    loop {
        if source.match_literal("-->") {
            return Ok(());
        }
        if !source.more() {
            return Err(XmlError::BufferExhausted {
                position: source.error_position(),
            });
        }
        source.next()?;
    }
}

fn skip_processing_instruction(source: &mut dyn ISource) -> Result<(), XmlError> {
    loop {
        if source.match_literal("?>") {
            return Ok(());
        }
        if !source.more() {
            return Err(XmlError::BufferExhausted {
                position: source.error_position(),
            });
        }
        source.next()?;
    }
}
