/// Module implementing the default recursive JSON parser.
/// Provides RFC 8259 parsing using recursive descent.
pub mod default;
