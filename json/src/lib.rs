//! A Rust library for parsing and stringifying JSON per RFC 8259.
//!
//! The document tree preserves what matters for faithful round-trips:
//! objects keep their member insertion order, numbers keep their original
//! lexeme, and strings are stored with escapes already resolved. Duplicate
//! object keys and trailing commas are rejected during parsing.

/// Module defining custom error types and error handling functionality
pub mod error;
/// Module providing input/output operations for reading and writing JSON data
pub mod io;
/// Module containing utility functions and helper methods
pub mod misc;

/// Module containing configuration options for parsing and stringification
pub mod config;
/// Module defining the core data structures for representing JSON nodes
pub mod nodes;
/// Module containing the parsing logic to decode JSON text into data structures
pub mod parser;
/// Module implementing serialization of data structures back to JSON text
pub mod stringify;
/// Module translating to/from JSON string escapes
pub mod translator;

///
/// Json_lib API
///

/// Returns the current version of the JSON library
pub use misc::get_version as version;

/// Reads JSON text from a file on disk
pub use misc::read_json_file as read_file;

/// Writes JSON text to a file on disk
pub use misc::write_json_file as write_file;

/// Destination implementation for writing JSON text to a memory buffer
pub use io::destinations::buffer::Buffer as BufferDestination;

/// Destination implementation for writing JSON text to a file
pub use io::destinations::file::File as FileDestination;

/// Source implementation for reading JSON text from a memory buffer
pub use io::sources::buffer::Buffer as BufferSource;

/// Source implementation for reading JSON text from a file
pub use io::sources::file::File as FileSource;

/// Core data structure representing a JSON node in the parsed tree
pub use nodes::node::Node;
/// JSON number preserving its source lexeme
pub use nodes::node::Numeric;
pub use nodes::node::make_node;

/// Error type and source position reported by the parser and stringifier
pub use error::{JsonError, Position};

/// Parser and stringifier configuration options
pub use config::{ParserConfig, StringifyConfig};

/// Parses JSON text into a Node tree structure
pub use parser::default::parse;
/// Parses JSON text with explicit configuration
pub use parser::default::parse_with_config;
/// Parses JSON text from a byte slice into a Node tree structure
pub use parser::default::parse_bytes;
/// Parses JSON text from a string into a Node tree structure
pub use parser::default::parse_str;

/// Converts a Node tree back to JSON text
pub use stringify::default::stringify;
/// Converts a Node tree to JSON text with explicit configuration
pub use stringify::default::stringify_with_config;
/// Converts a Node tree to JSON text as a String
pub use stringify::default::stringify_to_string;
/// Converts a Node tree to JSON text as a String with explicit configuration
pub use stringify::default::stringify_to_string_with_config;

/// Resolves JSON string escapes into the unicode string they denote
pub use translator::from_escaped;
/// Escapes a unicode string into JSON string contents
pub use translator::to_escaped;
/// Errors produced by the string translator
pub use translator::TranslateError;
