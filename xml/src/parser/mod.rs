/// Low-level helpers shared by the document and DTD parsers
pub(crate) mod core;

/// Module implementing the default XML document parser.
/// Builds the full document tree using recursive descent.
pub mod default;
