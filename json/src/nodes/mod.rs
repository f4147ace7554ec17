/// Module implementing JSON document tree types and operations.
///
/// Supports all JSON value types:
/// * Objects (insertion-order-preserving members)
/// * Arrays (ordered sequences)
/// * Strings (escapes resolved)
/// * Numbers (original lexeme preserved)
/// * Booleans and null
pub mod node;
