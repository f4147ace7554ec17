//! DTD validation of a parsed document tree.
//!
//! Validation walks the tree accumulating `ValidationError` items rather
//! than aborting: element declarations and content models first, attribute
//! declarations second, and ID/IDREF resolution in a deferred pass once
//! every ID in the document has been seen.

use super::content_model::ContentModel;
use super::{AttributeDefault, AttributeType, ContentSpec, Dtd};
use crate::config::ValidatorConfig;
use crate::entity::EntityDefinition;
use crate::error::ValidationError;
use crate::nodes::node::XNode;
use crate::translator::{is_name, is_name_token};
use std::collections::{HashMap, HashSet};

/// Validates a parsed document against the DTD embedded in its prolog.
/// Documents without a DTD validate trivially.
pub fn validate(document: &XNode) -> Vec<ValidationError> {
    validate_with_config(document, &ValidatorConfig::new())
}

/// Validates a parsed document, stopping at the first failure when the
/// configuration asks for one-shot mode.
pub fn validate_with_config(document: &XNode, config: &ValidatorConfig) -> Vec<ValidationError> {
    match document.dtd() {
        Some(dtd) => validate_against(document, dtd, config),
        None => Vec::new(),
    }
}

/// Validates a document tree against an explicit DTD.
pub fn validate_against(
    document: &XNode,
    dtd: &Dtd,
    config: &ValidatorConfig,
) -> Vec<ValidationError> {
    let mut validation = Validation {
        dtd,
        config,
        models: HashMap::new(),
        errors: Vec::new(),
        ids: HashSet::new(),
        idrefs: Vec::new(),
    };
    // Compile each children content model once, then match in linear time
    for (name, declaration) in &dtd.elements {
        if let ContentSpec::Children(particle) = &declaration.content {
            validation
                .models
                .insert(name.clone(), ContentModel::compile(particle));
        }
    }
    if let Some(root) = document.root() {
        if root.name() != Some(dtd.name.as_str()) {
            validation.record(
                root.name().unwrap_or(""),
                format!("root element does not match DOCTYPE name \"{}\"", dtd.name),
            );
        }
        validation.walk(root, Inherited::default());
    }
    // Deferred pass: every IDREF must name some ID seen anywhere in the tree
    if !validation.stopped() {
        for (reference, element) in std::mem::take(&mut validation.idrefs) {
            if !validation.ids.contains(&reference) {
                validation.record(
                    &element,
                    format!("IDREF \"{}\" does not match any ID in the document", reference),
                );
                if validation.stopped() {
                    break;
                }
            }
        }
    }
    validation.errors
}

struct Validation<'a> {
    dtd: &'a Dtd,
    config: &'a ValidatorConfig,
    models: HashMap<String, ContentModel>,
    errors: Vec<ValidationError>,
    ids: HashSet<String>,
    idrefs: Vec<(String, String)>,
}

/// Effective xml:space and xml:lang values at a point in the tree. Declared
/// values carry through to children unless a child declares its own.
#[derive(Clone, Copy, Default)]
struct Inherited<'a> {
    space: Option<&'a str>,
    lang: Option<&'a str>,
}

impl Validation<'_> {
    fn record(&mut self, element: &str, reason: impl Into<String>) {
        self.errors.push(ValidationError::new(element, reason));
    }

    fn stopped(&self) -> bool {
        self.config.fail_fast && !self.errors.is_empty()
    }

    fn walk<'b>(&mut self, element: &'b XNode, inherited: Inherited<'b>) {
        if self.stopped() {
            return;
        }
        // Declared xml:space / xml:lang override the inherited values for
        // this element and everything below it
        let effective = Inherited {
            space: element.attribute("xml:space").or(inherited.space),
            lang: element.attribute("xml:lang").or(inherited.lang),
        };
        let name = element.name().unwrap_or("");
        match self.dtd.element(name) {
            Some(declaration) => {
                let content = declaration.content.clone();
                self.check_content(element, name, &content, effective.space);
            }
            None => self.record(name, "element is not declared"),
        }
        self.check_attributes(element, name);
        for child in element.elements() {
            self.walk(child, effective);
        }
    }

    fn check_content(
        &mut self,
        element: &XNode,
        name: &str,
        content: &ContentSpec,
        effective_space: Option<&str>,
    ) {
        let child_names: Vec<&str> = element
            .children()
            .iter()
            .filter_map(|child| match child {
                XNode::Element { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        match content {
            ContentSpec::Any => {}
            ContentSpec::Empty => {
                // EMPTY admits no content at all, white space included
                if !child_names.is_empty() || has_content_nodes(element) {
                    self.record(name, "declared EMPTY but has content");
                }
            }
            ContentSpec::Mixed(allowed) => {
                for child in &child_names {
                    if !allowed.iter().any(|permitted| permitted == child) {
                        self.record(
                            name,
                            format!("child element <{}> not permitted in mixed content", child),
                        );
                    }
                }
            }
            ContentSpec::Children(_) => {
                if has_character_data(element) {
                    self.record(name, "character data not allowed in element content");
                } else if effective_space == Some("preserve") && has_content_nodes(element) {
                    // Inherited or declared preserve makes the white space
                    // between children significant, and element content
                    // admits none
                    self.record(
                        name,
                        "white space preserved by xml:space is not allowed in element content",
                    );
                }
                let matched = self
                    .models
                    .get(name)
                    .map(|model| model.matches(&child_names));
                if matched == Some(false) {
                    self.record(
                        name,
                        format!(
                            "child sequence ({}) does not match content model",
                            child_names.join(",")
                        ),
                    );
                }
            }
        }
    }

    fn check_attributes(&mut self, element: &XNode, name: &str) {
        let declarations = self.dtd.attributes_of(name).to_vec();
        for attribute in element.attributes() {
            // xml:-reserved attributes need no ATTLIST declaration
            if attribute.name == "xml:space" {
                if attribute.value != "default" && attribute.value != "preserve" {
                    self.record(name, "xml:space must be \"default\" or \"preserve\"");
                }
                continue;
            }
            if attribute.name == "xml:lang" {
                if !is_language_tag(&attribute.value) {
                    self.record(
                        name,
                        format!(
                            "xml:lang value \"{}\" is not a language tag",
                            attribute.value
                        ),
                    );
                }
                continue;
            }
            let Some(declaration) = declarations
                .iter()
                .find(|declaration| declaration.name == attribute.name)
            else {
                self.record(
                    name,
                    format!("attribute \"{}\" is not declared", attribute.name),
                );
                continue;
            };
            self.check_attribute_value(name, &declaration.attribute_type, &attribute.value);
            if let AttributeDefault::Fixed(expected) = &declaration.default {
                if attribute.value != *expected {
                    self.record(
                        name,
                        format!(
                            "attribute \"{}\" must keep its fixed value \"{}\"",
                            attribute.name, expected
                        ),
                    );
                }
            }
        }
        for declaration in &declarations {
            if declaration.default == AttributeDefault::Required
                && element.attribute(&declaration.name).is_none()
            {
                self.record(
                    name,
                    format!("required attribute \"{}\" is missing", declaration.name),
                );
            }
        }
    }

    fn check_attribute_value(&mut self, element: &str, declared: &AttributeType, value: &str) {
        match declared {
            AttributeType::CData => {}
            AttributeType::Id => {
                if !is_name(value) {
                    self.record(element, format!("ID value \"{}\" is not a name", value));
                } else if !self.ids.insert(value.to_string()) {
                    self.record(
                        element,
                        format!("ID value \"{}\" is not unique in the document", value),
                    );
                }
            }
            AttributeType::IdRef => {
                self.push_idref(element, value);
            }
            AttributeType::IdRefs => {
                if value.split_whitespace().next().is_none() {
                    self.record(element, "IDREFS attribute must contain at least one name");
                }
                for token in value.split_whitespace() {
                    self.push_idref(element, token);
                }
            }
            AttributeType::Entity => self.check_entity_name(element, value),
            AttributeType::Entities => {
                if value.split_whitespace().next().is_none() {
                    self.record(element, "ENTITIES attribute must contain at least one name");
                }
                for token in value.split_whitespace() {
                    self.check_entity_name(element, token);
                }
            }
            AttributeType::NmToken => {
                if !is_name_token(value) {
                    self.record(
                        element,
                        format!("NMTOKEN value \"{}\" is not a name token", value),
                    );
                }
            }
            AttributeType::NmTokens => {
                if value.split_whitespace().next().is_none() {
                    self.record(element, "NMTOKENS attribute must contain at least one token");
                }
                for token in value.split_whitespace() {
                    if !is_name_token(token) {
                        self.record(
                            element,
                            format!("NMTOKEN value \"{}\" is not a name token", token),
                        );
                    }
                }
            }
            AttributeType::Notation(allowed) => {
                if !allowed.iter().any(|permitted| permitted == value) {
                    self.record(
                        element,
                        format!("notation \"{}\" is not in the declared group", value),
                    );
                } else if !self.dtd.notations.contains_key(value) {
                    self.record(element, format!("notation \"{}\" is not declared", value));
                }
            }
            AttributeType::Enumeration(allowed) => {
                if !allowed.iter().any(|permitted| permitted == value) {
                    self.record(
                        element,
                        format!("value \"{}\" is not in the declared enumeration", value),
                    );
                }
            }
        }
    }

    fn push_idref(&mut self, element: &str, value: &str) {
        if !is_name(value) {
            self.record(element, format!("IDREF value \"{}\" is not a name", value));
        } else {
            self.idrefs.push((value.to_string(), element.to_string()));
        }
    }

    fn check_entity_name(&mut self, element: &str, value: &str) {
        match self.dtd.entities.general(value) {
            Some(EntityDefinition::Unparsed { .. }) => {}
            _ => self.record(
                element,
                format!("\"{}\" does not name an unparsed entity", value),
            ),
        }
    }
}

/// True when the element directly contains non-whitespace character data.
fn has_character_data(element: &XNode) -> bool {
    element.children().iter().any(|child| match child {
        XNode::Content { text } => !text.trim().is_empty(),
        XNode::Cdata { .. } | XNode::EntityReference { .. } => true,
        _ => false,
    })
}

/// True when the element directly contains any character data node at all,
/// white space included.
fn has_content_nodes(element: &XNode) -> bool {
    element.children().iter().any(|child| {
        matches!(
            child,
            XNode::Content { .. } | XNode::Cdata { .. } | XNode::EntityReference { .. }
        )
    })
}

/// The XML 1.0 LanguageID shape: an alphabetic primary subtag followed by
/// alphanumeric subtags, '-' separated, each 1 to 8 characters.
fn is_language_tag(value: &str) -> bool {
    let mut subtags = value.split('-');
    let Some(primary) = subtags.next() else {
        return false;
    };
    if primary.is_empty() || primary.len() > 8 || !primary.chars().all(|c| c.is_ascii_alphabetic())
    {
        return false;
    }
    subtags.all(|subtag| {
        !subtag.is_empty() && subtag.len() <= 8 && subtag.chars().all(|c| c.is_ascii_alphanumeric())
    })
}
