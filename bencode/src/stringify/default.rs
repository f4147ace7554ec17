//! Module providing functionality to convert bencode nodes into their
//! encoded representation. Implements the bencode encoding rules for
//! different node types.

use crate::error::BencodeError;
use crate::io::traits::IDestination;
use crate::nodes::node::Node;

/// Converts a bencode Node into its encoded form and writes it to the
/// destination. Dictionary keys are emitted in byte-lexicographic order,
/// which the map's iteration order already guarantees, so encoding is
/// always canonical.
pub fn stringify(node: &Node, destination: &mut dyn IDestination) -> Result<(), BencodeError> {
    match node {
        // Handle integer nodes by formatting as "i<value>e"
        Node::Integer(value) => {
            destination.add_bytes(format!("i{}e", value).as_bytes())?;
        }
        // Handle string nodes by formatting as "<length>:<bytes>"
        Node::Str(value) => {
            destination.add_bytes(format!("{}:", value.len()).as_bytes())?;
            destination.add_bytes(value)?;
        }
        // Handle list nodes by wrapping items with 'l' and 'e' markers
        Node::List(items) => {
            destination.add_byte(b'l')?;
            for item in items {
                stringify(item, destination)?;
            }
            destination.add_byte(b'e')?;
        }
        // Handle dictionary nodes by wrapping key-value pairs with 'd' and 'e' markers
        Node::Dictionary(items) => {
            destination.add_byte(b'd')?;
            for (key, value) in items {
                destination.add_bytes(format!("{}:", key.len()).as_bytes())?;
                destination.add_bytes(key)?;
                stringify(value, destination)?;
            }
            destination.add_byte(b'e')?;
        }
        // None nodes have no encoded representation
        Node::None => {}
    }
    Ok(())
}

/// Converts a Node tree to bencode format as bytes.
pub fn stringify_to_bytes(node: &Node) -> Result<Vec<u8>, BencodeError> {
    use crate::io::destinations::buffer::Buffer;
    let mut destination = Buffer::new();
    stringify(node, &mut destination)?;
    Ok(destination.into_bytes())
}

/// Converts a Node tree to bencode format as a String (lossy for non-UTF-8
/// byte strings).
pub fn stringify_to_string(node: &Node) -> Result<String, BencodeError> {
    Ok(String::from_utf8_lossy(&stringify_to_bytes(node)?).into_owned())
}
