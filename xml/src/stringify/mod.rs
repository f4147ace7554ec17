/// Module for converting document trees back to XML text.
pub mod default;
