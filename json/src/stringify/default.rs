//! Module providing functionality to convert JSON nodes back into their
//! textual representation. Emission is format-preserving: numbers are
//! written as their original lexemes.

use crate::config::StringifyConfig;
use crate::error::JsonError;
use crate::io::traits::IDestination;
use crate::nodes::node::Node;
use crate::translator::to_escaped;

/// Converts a Node structure into compact JSON text and writes it to the
/// given destination, escaping non-ASCII scalars.
pub fn stringify(node: &Node, destination: &mut dyn IDestination) -> Result<(), JsonError> {
    stringify_with_config(node, destination, &StringifyConfig::new())
}

/// Converts a Node structure into JSON text and writes it to the given
/// destination. The configuration selects compact or pretty form and the
/// non-ASCII escape policy.
pub fn stringify_with_config(
    node: &Node,
    destination: &mut dyn IDestination,
    config: &StringifyConfig,
) -> Result<(), JsonError> {
    write_value(node, destination, config, 0)
}

/// Converts a Node tree to a JSON String using default configuration.
pub fn stringify_to_string(node: &Node) -> Result<String, JsonError> {
    use crate::io::destinations::buffer::Buffer;
    let mut destination = Buffer::new();
    stringify(node, &mut destination)?;
    Ok(destination.to_string())
}

/// Converts a Node tree to a JSON String with explicit configuration.
pub fn stringify_to_string_with_config(
    node: &Node,
    config: &StringifyConfig,
) -> Result<String, JsonError> {
    use crate::io::destinations::buffer::Buffer;
    let mut destination = Buffer::new();
    stringify_with_config(node, &mut destination, config)?;
    Ok(destination.to_string())
}

fn write_value(
    node: &Node,
    destination: &mut dyn IDestination,
    config: &StringifyConfig,
    level: usize,
) -> Result<(), JsonError> {
    match node {
        Node::Object(members) => {
            if members.is_empty() {
                return destination.add_bytes("{}");
            }
            destination.add_byte(b'{')?;
            for (index, (key, value)) in members.iter().enumerate() {
                if index > 0 {
                    destination.add_byte(b',')?;
                }
                newline_indent(destination, config, level + 1)?;
                destination.add_byte(b'"')?;
                destination.add_bytes(&to_escaped(key, config.ascii_only))?;
                destination.add_bytes("\":")?;
                if config.indent.is_some() {
                    destination.add_byte(b' ')?;
                }
                write_value(value, destination, config, level + 1)?;
            }
            newline_indent(destination, config, level)?;
            destination.add_byte(b'}')
        }
        Node::Array(elements) => {
            if elements.is_empty() {
                return destination.add_bytes("[]");
            }
            destination.add_byte(b'[')?;
            for (index, element) in elements.iter().enumerate() {
                if index > 0 {
                    destination.add_byte(b',')?;
                }
                newline_indent(destination, config, level + 1)?;
                write_value(element, destination, config, level + 1)?;
            }
            newline_indent(destination, config, level)?;
            destination.add_byte(b']')
        }
        Node::Str(text) => {
            destination.add_byte(b'"')?;
            destination.add_bytes(&to_escaped(text, config.ascii_only))?;
            destination.add_byte(b'"')
        }
        // The lexeme captured at parse time is emitted verbatim
        Node::Number(numeric) => destination.add_bytes(numeric.lexeme()),
        Node::Boolean(true) => destination.add_bytes("true"),
        Node::Boolean(false) => destination.add_bytes("false"),
        Node::Null => destination.add_bytes("null"),
    }
}

fn newline_indent(
    destination: &mut dyn IDestination,
    config: &StringifyConfig,
    level: usize,
) -> Result<(), JsonError> {
    if let Some(width) = config.indent {
        destination.add_byte(b'\n')?;
        destination.add_bytes(&" ".repeat(width * level))?;
    }
    Ok(())
}
