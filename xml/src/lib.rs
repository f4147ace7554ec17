//! A Rust library for parsing, validating and stringifying XML 1.0
//! documents, including the DTD subset: element content models, attribute
//! declarations, entities and notations.
//!
//! Sources transcode UTF-8/UTF-16 input once at construction and normalize
//! CRLF and lone CR to LF, so the parser works purely on Unicode scalars.
//! Well-formedness violations are fatal parse errors with source positions;
//! DTD validity failures are collected by the validator and returned whole.

/// Module defining custom error types and error handling functionality
pub mod error;
/// Module providing input/output operations for reading and writing XML data
pub mod io;
/// Module containing utility functions and helper methods
pub mod misc;

/// Module containing configuration options for parsing and validation
pub mod config;
/// Module implementing the DTD model, parser, content models and validator
pub mod dtd;
/// Module implementing entity tables and cycle-safe expansion
pub mod entity;
/// Module defining the core data structures for representing XML nodes
pub mod nodes;
/// Module containing the parsing logic to decode XML text into a document tree
pub mod parser;
/// Module implementing serialization of document trees back to XML text
pub mod stringify;
/// Module escaping character data and decoding character references
pub mod translator;

///
/// Xml_lib API
///

/// Returns the current version of the XML library
pub use misc::get_version as version;

/// Reads an XML document from a file on disk as raw bytes
pub use misc::read_xml_file as read_file;

/// Writes XML text to a file on disk
pub use misc::write_xml_file as write_file;

/// Destination implementation for writing XML text to a memory buffer
pub use io::destinations::buffer::Buffer as BufferDestination;

/// Destination implementation for writing XML text to a file
pub use io::destinations::file::File as FileDestination;

/// Source implementation for reading XML text from a memory buffer
pub use io::sources::buffer::Buffer as BufferSource;

/// Source implementation for reading XML text from a file
pub use io::sources::file::File as FileSource;

/// Core data structures representing the parsed document tree
pub use nodes::node::{Attribute, XNode, XmlDeclaration};

/// Error types and source position reported by the parser and validator
pub use error::{Position, ValidationError, XmlError};

/// Parser and validator configuration options
pub use config::{ParserConfig, ValidatorConfig};

/// The structured document type definition model
pub use dtd::{
    AttributeDecl, AttributeDefault, AttributeType, ContentParticle, ContentSpec, Dtd,
    ElementDecl, ExternalId, Occurrence, ParticleTerm,
};

/// Entity tables and definitions
pub use entity::{EntityDefinition, EntityMapper};

/// Parses an XML document into a document tree
pub use parser::default::parse;
/// Parses an XML document with explicit configuration
pub use parser::default::parse_with_config;
/// Parses an XML document from raw bytes, detecting UTF-8 or UTF-16
pub use parser::default::parse_bytes;
/// Parses an XML document from a string
pub use parser::default::parse_str;

/// Converts a document tree back to XML text
pub use stringify::default::stringify;
/// Converts a document tree to XML text as a String
pub use stringify::default::stringify_to_string;

/// Validates a parsed document against the DTD in its prolog
pub use dtd::validator::validate;
/// Validates a parsed document with explicit configuration
pub use dtd::validator::validate_with_config;
