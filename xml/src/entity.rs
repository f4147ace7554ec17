//! Entity tables and expansion.
//!
//! General entities come from the DTD (internal literals, external parsed
//! entities fetched by system identifier, and unparsed NDATA entities);
//! parameter entities are recognized only inside the DTD. Expansion keeps an
//! active-entity stack so a reference to an entity already being expanded
//! fails instead of recursing forever.

use crate::error::{Position, XmlError};
use crate::translator;
use std::collections::HashMap;
use std::fs;

/// The five predefined entities, always available.
pub const PREDEFINED: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("apos", '\''),
    ("quot", '"'),
];

/// Looks up a predefined entity by name.
pub fn predefined(name: &str) -> Option<char> {
    PREDEFINED
        .iter()
        .find(|(entity, _)| *entity == name)
        .map(|(_, character)| *character)
}

/// How an entity was declared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntityDefinition {
    /// Internal literal replacement text
    Internal(String),
    /// External parsed entity located by its system identifier
    External {
        system: String,
        public: Option<String>,
    },
    /// External unparsed entity with an associated notation; it has no
    /// replacement text and may only be named by ENTITY-typed attributes
    Unparsed {
        system: String,
        public: Option<String>,
        notation: String,
    },
}

/// Tables of general and parameter entities declared by a DTD.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityMapper {
    general: HashMap<String, EntityDefinition>,
    parameter: HashMap<String, EntityDefinition>,
}

impl EntityMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a general entity. The first declaration of a name is binding.
    pub fn add_general(&mut self, name: &str, definition: EntityDefinition) {
        self.general
            .entry(name.to_string())
            .or_insert(definition);
    }

    /// Register a parameter entity. The first declaration of a name is binding.
    pub fn add_parameter(&mut self, name: &str, definition: EntityDefinition) {
        self.parameter
            .entry(name.to_string())
            .or_insert(definition);
    }

    pub fn general(&self, name: &str) -> Option<&EntityDefinition> {
        self.general.get(name)
    }

    pub fn parameter(&self, name: &str) -> Option<&EntityDefinition> {
        self.parameter.get(name)
    }

    /// The replacement text of a general entity. External parsed entities
    /// are fetched by their system identifier.
    pub fn replacement_text(&self, name: &str, position: Position) -> Result<String, XmlError> {
        match self.general(name) {
            Some(EntityDefinition::Internal(text)) => Ok(text.clone()),
            Some(EntityDefinition::External { system, .. }) => Ok(fs::read_to_string(system)?),
            Some(EntityDefinition::Unparsed { .. }) => Err(XmlError::syntax(
                format!("reference to unparsed entity \"{}\"", name),
                position,
            )),
            None => Err(XmlError::UnknownEntity {
                name: name.to_string(),
                position,
            }),
        }
    }

    /// The replacement text of a parameter entity.
    pub fn parameter_replacement_text(
        &self,
        name: &str,
        position: Position,
    ) -> Result<String, XmlError> {
        match self.parameter(name) {
            Some(EntityDefinition::Internal(text)) => Ok(text.clone()),
            Some(EntityDefinition::External { system, .. }) => Ok(fs::read_to_string(system)?),
            Some(EntityDefinition::Unparsed { .. }) | None => Err(XmlError::UnknownEntity {
                name: name.to_string(),
                position,
            }),
        }
    }

    /// Fully expands a general entity into plain text: character references
    /// decode, predefined entities resolve, and nested general entities
    /// expand recursively. `active` is the stack of entity names currently
    /// being expanded; re-entering one fails with `RecursiveEntity`.
    pub fn expand(
        &self,
        name: &str,
        active: &mut Vec<String>,
        position: Position,
    ) -> Result<String, XmlError> {
        if active.iter().any(|frame| frame == name) {
            return Err(XmlError::RecursiveEntity {
                name: name.to_string(),
                position,
            });
        }
        active.push(name.to_string());
        let result = self.expand_text(&self.replacement_text(name, position)?, active, position);
        active.pop();
        result
    }

    /// Expands references inside replacement text.
    fn expand_text(
        &self,
        text: &str,
        active: &mut Vec<String>,
        position: Position,
    ) -> Result<String, XmlError> {
        let mut expansion = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(amp) = rest.find('&') {
            expansion.push_str(&rest[..amp]);
            let after = &rest[amp + 1..];
            let semi = after.find(';').ok_or_else(|| {
                XmlError::syntax("unterminated entity reference in replacement text", position)
            })?;
            let body = &after[..semi];
            if let Some(digits) = body.strip_prefix("#x") {
                expansion.push(
                    translator::decode_char_ref(digits, true)
                        .ok_or(XmlError::InvalidCharacterReference { position })?,
                );
            } else if let Some(digits) = body.strip_prefix('#') {
                expansion.push(
                    translator::decode_char_ref(digits, false)
                        .ok_or(XmlError::InvalidCharacterReference { position })?,
                );
            } else if let Some(character) = predefined(body) {
                expansion.push(character);
            } else {
                expansion.push_str(&self.expand(body, active, position)?);
            }
            rest = &after[semi + 1..];
        }
        expansion.push_str(rest);
        Ok(expansion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position() -> Position {
        Position::default()
    }

    #[test]
    fn predefined_entities_resolve() {
        assert_eq!(predefined("amp"), Some('&'));
        assert_eq!(predefined("lt"), Some('<'));
        assert_eq!(predefined("nbsp"), None);
    }

    #[test]
    fn first_declaration_wins() {
        let mut mapper = EntityMapper::new();
        mapper.add_general("e", EntityDefinition::Internal("first".to_string()));
        mapper.add_general("e", EntityDefinition::Internal("second".to_string()));
        assert_eq!(
            mapper.general("e"),
            Some(&EntityDefinition::Internal("first".to_string()))
        );
    }

    #[test]
    fn expand_resolves_nested_entities() {
        let mut mapper = EntityMapper::new();
        mapper.add_general("inner", EntityDefinition::Internal("world".to_string()));
        mapper.add_general(
            "outer",
            EntityDefinition::Internal("hello &inner;!".to_string()),
        );
        assert_eq!(
            mapper.expand("outer", &mut vec![], position()).unwrap(),
            "hello world!"
        );
    }

    #[test]
    fn expand_decodes_character_and_predefined_references() {
        let mut mapper = EntityMapper::new();
        mapper.add_general(
            "e",
            EntityDefinition::Internal("A&#66;&#x43; &amp; done".to_string()),
        );
        assert_eq!(
            mapper.expand("e", &mut vec![], position()).unwrap(),
            "ABC & done"
        );
    }

    #[test]
    fn direct_recursion_is_detected() {
        let mut mapper = EntityMapper::new();
        mapper.add_general("x", EntityDefinition::Internal("&x;".to_string()));
        assert!(matches!(
            mapper.expand("x", &mut vec![], position()),
            Err(XmlError::RecursiveEntity { name, .. }) if name == "x"
        ));
    }

    #[test]
    fn mutual_recursion_is_detected() {
        let mut mapper = EntityMapper::new();
        mapper.add_general("a", EntityDefinition::Internal("to &b;".to_string()));
        mapper.add_general("b", EntityDefinition::Internal("and &a;".to_string()));
        assert!(matches!(
            mapper.expand("a", &mut vec![], position()),
            Err(XmlError::RecursiveEntity { name, .. }) if name == "a"
        ));
    }

    #[test]
    fn undefined_entity_reference_fails() {
        let mapper = EntityMapper::new();
        assert!(matches!(
            mapper.expand("ghost", &mut vec![], position()),
            Err(XmlError::UnknownEntity { name, .. }) if name == "ghost"
        ));
    }

    #[test]
    fn unparsed_entity_has_no_replacement_text() {
        let mut mapper = EntityMapper::new();
        mapper.add_general(
            "image",
            EntityDefinition::Unparsed {
                system: "image.gif".to_string(),
                public: None,
                notation: "gif".to_string(),
            },
        );
        assert!(matches!(
            mapper.replacement_text("image", position()),
            Err(XmlError::Syntax { .. })
        ));
    }

    #[test]
    fn external_entity_reads_its_system_file() {
        let path = "xml_entity_external.txt";
        std::fs::write(path, "external text").unwrap();
        let mut mapper = EntityMapper::new();
        mapper.add_general(
            "ext",
            EntityDefinition::External {
                system: path.to_string(),
                public: None,
            },
        );
        let expanded = mapper.expand("ext", &mut vec![], position()).unwrap();
        std::fs::remove_file(path).unwrap();
        assert_eq!(expanded, "external text");
    }
}
