//! Module providing functionality to convert a document tree back into XML
//! text: declaration, prolog items, DTD (verbatim), root element and epilog.

use crate::error::XmlError;
use crate::io::traits::IDestination;
use crate::nodes::node::XNode;
use crate::translator::{escape_attribute, escape_content};

/// Converts a document or subtree into XML text and writes it to the given
/// destination. Elements without children emit in empty-element form.
pub fn stringify(node: &XNode, destination: &mut dyn IDestination) -> Result<(), XmlError> {
    match node {
        XNode::Prolog {
            declaration,
            children,
        } => {
            destination.add_bytes("<?xml version=\"")?;
            destination.add_bytes(&declaration.version)?;
            destination.add_bytes("\" encoding=\"")?;
            destination.add_bytes(&declaration.encoding)?;
            destination.add_bytes("\" standalone=\"")?;
            destination.add_bytes(&declaration.standalone)?;
            destination.add_bytes("\"?>")?;
            for child in children {
                stringify(child, destination)?;
            }
            Ok(())
        }
        XNode::Element {
            name,
            attributes,
            children,
        } => {
            destination.add_char('<')?;
            destination.add_bytes(name)?;
            for attribute in attributes {
                destination.add_char(' ')?;
                destination.add_bytes(&attribute.name)?;
                destination.add_bytes("=\"")?;
                destination.add_bytes(&escape_attribute(&attribute.value))?;
                destination.add_char('"')?;
            }
            if children.is_empty() {
                return destination.add_bytes("/>");
            }
            destination.add_char('>')?;
            for child in children {
                stringify(child, destination)?;
            }
            destination.add_bytes("</")?;
            destination.add_bytes(name)?;
            destination.add_char('>')
        }
        XNode::Content { text } => destination.add_bytes(&escape_content(text)),
        XNode::Cdata { text } => {
            destination.add_bytes("<![CDATA[")?;
            destination.add_bytes(text)?;
            destination.add_bytes("]]>")
        }
        // The reference is emitted, not its expansion
        XNode::EntityReference { reference, .. } => destination.add_bytes(reference),
        XNode::ProcessingInstruction {
            target,
            instruction,
        } => {
            destination.add_bytes("<?")?;
            destination.add_bytes(target)?;
            if !instruction.is_empty() {
                destination.add_char(' ')?;
                destination.add_bytes(instruction)?;
            }
            destination.add_bytes("?>")
        }
        XNode::Comment { text } => {
            destination.add_bytes("<!--")?;
            destination.add_bytes(text)?;
            destination.add_bytes("-->")
        }
        XNode::Dtd(dtd) => destination.add_bytes(&dtd.raw),
    }
}

/// Converts a document tree to XML text as a String.
pub fn stringify_to_string(node: &XNode) -> Result<String, XmlError> {
    use crate::io::destinations::buffer::Buffer;
    let mut destination = Buffer::new();
    stringify(node, &mut destination)?;
    Ok(destination.to_string())
}
