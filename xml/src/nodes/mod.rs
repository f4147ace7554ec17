/// Module implementing the XML document tree types and operations.
///
/// The tree covers the whole document: declaration, prolog comments and
/// processing instructions, DTD, root element with attributes and nested
/// children, character data, CDATA sections, entity references and epilog.
pub mod node;
