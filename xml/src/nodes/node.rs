use crate::dtd::Dtd;
use core::fmt;

/// Attributes of the XML declaration. Missing attributes take the defaults
/// version "1.0", encoding "UTF-8", standalone "no".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlDeclaration {
    pub version: String,
    pub encoding: String,
    pub standalone: String,
}

impl Default for XmlDeclaration {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: "UTF-8".to_string(),
            standalone: "no".to_string(),
        }
    }
}

/// A name/value attribute pair on an element. Namespace prefixes are kept
/// lexically as part of the name; they are not interpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The namespace prefix, when the name contains one.
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// The name with any namespace prefix removed.
    pub fn local_name(&self) -> &str {
        self.name
            .split_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }
}

/// A node in the XML document tree.
///
/// `parse` returns a `Prolog` node packaging the declaration, any leading
/// processing instructions and comments, the optional DTD, the root element
/// and the epilog, all in document order. Nodes exclusively own their
/// children; the tree is a tree, never a DAG.
#[derive(Clone, Debug, PartialEq)]
pub enum XNode {
    /// Document wrapper: declaration attributes plus prolog/root/epilog children
    Prolog {
        declaration: XmlDeclaration,
        children: Vec<XNode>,
    },
    /// An element with ordered attributes and ordered children
    Element {
        name: String,
        attributes: Vec<Attribute>,
        children: Vec<XNode>,
    },
    /// Character data with entity and character references already expanded
    Content { text: String },
    /// Verbatim character data from a CDATA section, never entity-expanded
    Cdata { text: String },
    /// A general entity reference retaining both its textual form and its
    /// expansion
    EntityReference { reference: String, expansion: String },
    /// A processing instruction
    ProcessingInstruction { target: String, instruction: String },
    /// A comment
    Comment { text: String },
    /// The document type declaration
    Dtd(Box<Dtd>),
}

impl XNode {
    /// Returns the element or PI target name, when the node has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            XNode::Element { name, .. } => Some(name),
            XNode::ProcessingInstruction { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Returns true if the node is an Element.
    pub fn is_element(&self) -> bool {
        matches!(self, XNode::Element { .. })
    }

    /// Returns the node's children, when it can have any.
    pub fn children(&self) -> &[XNode] {
        match self {
            XNode::Prolog { children, .. } | XNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Returns the element's attributes.
    pub fn attributes(&self) -> &[Attribute] {
        match self {
            XNode::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Looks up an attribute value on an element by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes()
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    /// The element children of this node, in document order.
    pub fn elements(&self) -> Vec<&XNode> {
        self.children()
            .iter()
            .filter(|child| child.is_element())
            .collect()
    }

    /// The root element of a parsed document.
    pub fn root(&self) -> Option<&XNode> {
        match self {
            XNode::Prolog { children, .. } => {
                children.iter().find(|child| child.is_element())
            }
            XNode::Element { .. } => Some(self),
            _ => None,
        }
    }

    /// The DTD of a parsed document, when one was declared.
    pub fn dtd(&self) -> Option<&Dtd> {
        match self {
            XNode::Prolog { children, .. } => children.iter().find_map(|child| match child {
                XNode::Dtd(dtd) => Some(dtd.as_ref()),
                _ => None,
            }),
            _ => None,
        }
    }

    /// Concatenated character data of this subtree: content, CDATA and
    /// entity-reference expansions, in document order.
    pub fn text(&self) -> String {
        let mut collected = String::new();
        self.collect_text(&mut collected);
        collected
    }

    fn collect_text(&self, collected: &mut String) {
        match self {
            XNode::Content { text } | XNode::Cdata { text } => collected.push_str(text),
            XNode::EntityReference { expansion, .. } => collected.push_str(expansion),
            XNode::Prolog { children, .. } | XNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(collected);
                }
            }
            _ => {}
        }
    }
}

impl fmt::Display for XNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XNode::Prolog { .. } => write!(f, "(document)"),
            XNode::Element { name, .. } => write!(f, "<{}>", name),
            XNode::Content { text } => write!(f, "{}", text),
            XNode::Cdata { text } => write!(f, "<![CDATA[{}]]>", text),
            XNode::EntityReference { reference, .. } => write!(f, "{}", reference),
            XNode::ProcessingInstruction { target, .. } => write!(f, "<?{}?>", target),
            XNode::Comment { text } => write!(f, "<!--{}-->", text),
            XNode::Dtd(dtd) => write!(f, "<!DOCTYPE {}>", dtd.name),
        }
    }
}
