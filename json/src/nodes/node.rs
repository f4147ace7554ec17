use core::fmt;

/// A JSON number held as its original textual lexeme.
///
/// Keeping the lexeme means numbers never lose precision through the tree:
/// `1.0e2` re-stringifies as `1.0e2`, not `100`. The numeric value is parsed
/// on demand.
#[derive(Clone, Debug, PartialEq)]
pub struct Numeric {
    lexeme: String,
}

impl Numeric {
    /// Wrap a number lexeme. The parser only constructs these from text it
    /// has validated against the RFC 8259 number grammar.
    pub fn new(lexeme: impl Into<String>) -> Self {
        Self {
            lexeme: lexeme.into(),
        }
    }

    pub fn from_i64(value: i64) -> Self {
        Self {
            lexeme: value.to_string(),
        }
    }

    pub fn from_f64(value: f64) -> Self {
        Self {
            lexeme: value.to_string(),
        }
    }

    /// The original textual form.
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// The value as a double, parsed on demand.
    pub fn as_f64(&self) -> Option<f64> {
        self.lexeme.parse::<f64>().ok()
    }

    /// The value as a signed integer, when the lexeme is integral and fits.
    pub fn as_i64(&self) -> Option<i64> {
        self.lexeme.parse::<i64>().ok()
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexeme)
    }
}

/// A node in the JSON document tree.
///
/// Objects preserve insertion order, which re-serialization keeps. The
/// parser rejects duplicate keys, so each key appears at most once.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// An ordered set of key-value members
    Object(Vec<(String, Node)>),
    /// An ordered sequence of values
    Array(Vec<Node>),
    /// A Unicode string with escapes already resolved
    Str(String),
    /// A number preserving its source lexeme
    Number(Numeric),
    /// true or false
    Boolean(bool),
    /// null
    Null,
}

impl Node {
    /// Returns true if the node is an Object variant
    pub fn is_object(&self) -> bool {
        matches!(self, Node::Object(_))
    }

    /// Returns true if the node is an Array variant
    pub fn is_array(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    /// Returns true if the node is a Str variant
    pub fn is_string(&self) -> bool {
        matches!(self, Node::Str(_))
    }

    /// Returns true if the node is a Number variant
    pub fn is_number(&self) -> bool {
        matches!(self, Node::Number(_))
    }

    /// Returns true if the node is a Boolean variant
    pub fn is_boolean(&self) -> bool {
        matches!(self, Node::Boolean(_))
    }

    /// Returns true if the node is the Null variant
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// Returns the members if this is an Object node
    pub fn as_object(&self) -> Option<&Vec<(String, Node)>> {
        match self {
            Node::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Returns the mutable members if this is an Object node
    pub fn as_object_mut(&mut self) -> Option<&mut Vec<(String, Node)>> {
        match self {
            Node::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Returns the elements if this is an Array node
    pub fn as_array(&self) -> Option<&Vec<Node>> {
        match self {
            Node::Array(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns the mutable elements if this is an Array node
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Array(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns the text if this is a Str node
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the number if this is a Number node
    pub fn as_number(&self) -> Option<&Numeric> {
        match self {
            Node::Number(numeric) => Some(numeric),
            _ => None,
        }
    }

    /// Returns the value if this is a Boolean node
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Gets a member value from an Object node by key
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Object(members) => members
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Gets a mutable member value from an Object node by key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        match self {
            Node::Object(members) => members
                .iter_mut()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Returns the number of members or elements, the character length of a
    /// Str, or 0 for other types
    pub fn len(&self) -> usize {
        match self {
            Node::Object(members) => members.len(),
            Node::Array(elements) => elements.len(),
            Node::Str(text) => text.chars().count(),
            _ => 0,
        }
    }

    /// Returns true if an Object, Array or Str is empty, or for Null
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Object(members) => members.is_empty(),
            Node::Array(elements) => elements.is_empty(),
            Node::Str(text) => text.is_empty(),
            Node::Null => true,
            _ => false,
        }
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Object(_) => "object",
            Node::Array(_) => "array",
            Node::Str(_) => "string",
            Node::Number(_) => "number",
            Node::Boolean(_) => "boolean",
            Node::Null => "null",
        }
    }
}

/// Converts a vector of values into an Array node
impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(value: Vec<T>) -> Self {
        Node::Array(value.into_iter().map(|x| x.into()).collect())
    }
}

/// Converts an integer into a Number node
impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Number(Numeric::from_i64(value))
    }
}

/// Converts a double into a Number node
impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Number(Numeric::from_f64(value))
    }
}

/// Converts a string slice into a Str node
impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Str(String::from(value))
    }
}

/// Converts a String into a Str node
impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Str(value)
    }
}

/// Converts a bool into a Boolean node
impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Boolean(value)
    }
}

// Allow creating an Array node from a static array literal
impl<T, const N: usize> From<[T; N]> for Node
where
    T: Into<Node>,
{
    fn from(value: [T; N]) -> Self {
        Node::Array(value.into_iter().map(|x| x.into()).collect())
    }
}

// Allow creating an Object node from a static array of key-value pairs,
// preserving the given member order
impl<K, V, const N: usize> From<[(K, V); N]> for Node
where
    K: Into<String>,
    V: Into<Node>,
{
    fn from(value: [(K, V); N]) -> Self {
        Node::Object(
            value
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Helper function to create a Node from any value that can be converted into a Node
pub fn make_node<T>(value: T) -> Node
where
    T: Into<Node>,
{
    value.into()
}

/// Implements Display trait for Node, rendering the compact JSON form with
/// the minimal escape set.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Object(members) => {
                write!(f, "{{")?;
                for (index, (key, value)) in members.iter().enumerate() {
                    if index > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "\"{}\":{}", key, value)?;
                }
                write!(f, "}}")
            }
            Node::Array(elements) => {
                write!(f, "[")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
            Node::Str(text) => {
                write!(f, "\"{}\"", crate::translator::to_escaped(text, false))
            }
            Node::Number(numeric) => write!(f, "{}", numeric),
            Node::Boolean(value) => write!(f, "{}", value),
            Node::Null => write!(f, "null"),
        }
    }
}
