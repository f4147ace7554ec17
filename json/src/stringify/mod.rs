/// Module for converting JSON document trees back to their textual form.
pub mod default;
