use crate::error::BencodeError;
use core::fmt;
use std::collections::BTreeMap;

/// A node in the bencode data structure that can represent different types
/// of values.
///
/// Bencode strings are opaque byte sequences, so both string payloads and
/// dictionary keys are raw bytes. Dictionaries are kept in a `BTreeMap`,
/// which makes strictly increasing byte-lexicographic key order a structural
/// invariant rather than a property re-established at encode time.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Represents a 64-bit signed integer value
    Integer(i64),
    /// Represents a raw byte string value
    Str(Vec<u8>),
    /// Represents a list of other nodes
    List(Vec<Node>),
    /// Represents a dictionary of byte-string keys to node values,
    /// ordered byte-lexicographically
    Dictionary(BTreeMap<Vec<u8>, Node>),
    /// Represents an empty or uninitialized node
    None,
}

impl Node {
    pub(crate) fn add_to_list(&mut self, value: Node) -> Result<(), &'static str> {
        match self {
            Node::List(list) => {
                list.push(value);
                Ok(())
            }
            _ => Err("Cannot add to non-list node"),
        }
    }

    pub(crate) fn add_to_dictionary(&mut self, key: &[u8], value: Node) -> Result<(), &'static str> {
        match self {
            Node::Dictionary(dict) => {
                let _ = dict.insert(key.to_vec(), value);
                Ok(())
            }
            _ => Err("Cannot add to non-dictionary node"),
        }
    }

    /// Returns true if the node is an Integer variant
    pub fn is_integer(&self) -> bool {
        matches!(self, Node::Integer(_))
    }

    /// Returns true if the node is a Str variant
    pub fn is_string(&self) -> bool {
        matches!(self, Node::Str(_))
    }

    /// Returns true if the node is a List variant
    pub fn is_list(&self) -> bool {
        matches!(self, Node::List(_))
    }

    /// Returns true if the node is a Dictionary variant
    pub fn is_dictionary(&self) -> bool {
        matches!(self, Node::Dictionary(_))
    }

    /// Returns true if the node is a None variant
    pub fn is_none(&self) -> bool {
        matches!(self, Node::None)
    }

    /// Returns the inner integer value if this is an Integer node
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Node::Integer(integer) => Some(*integer),
            _ => None,
        }
    }

    /// Returns the inner bytes if this is a Str node
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Node::Str(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the inner bytes as UTF-8 text if this is a Str node holding
    /// valid UTF-8
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Node::Str(bytes) => core::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }

    /// Returns a reference to the inner list if this is a List node
    pub fn as_list(&self) -> Option<&Vec<Node>> {
        match self {
            Node::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns a mutable reference to the inner list if this is a List node
    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns a reference to the inner dictionary if this is a Dictionary node
    pub fn as_dictionary(&self) -> Option<&BTreeMap<Vec<u8>, Node>> {
        match self {
            Node::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Returns a mutable reference to the inner dictionary if this is a
    /// Dictionary node
    pub fn as_dictionary_mut(&mut self) -> Option<&mut BTreeMap<Vec<u8>, Node>> {
        match self {
            Node::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Gets a value from a Dictionary node by key
    pub fn get(&self, key: &[u8]) -> Option<&Node> {
        match self {
            Node::Dictionary(dict) => dict.get(key),
            _ => None,
        }
    }

    /// Gets a mutable value from a Dictionary node by key
    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut Node> {
        match self {
            Node::Dictionary(dict) => dict.get_mut(key),
            _ => None,
        }
    }

    /// Returns the number of elements in a List or Dictionary, the byte
    /// length of a Str, or 0 for other types
    pub fn len(&self) -> usize {
        match self {
            Node::List(list) => list.len(),
            Node::Dictionary(dict) => dict.len(),
            Node::Str(bytes) => bytes.len(),
            _ => 0,
        }
    }

    /// Returns true if a List, Dictionary or Str is empty, or for None
    pub fn is_empty(&self) -> bool {
        match self {
            Node::List(list) => list.is_empty(),
            Node::Dictionary(dict) => dict.is_empty(),
            Node::Str(bytes) => bytes.is_empty(),
            Node::None => true,
            _ => false,
        }
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Integer(_) => "integer",
            Node::Str(_) => "string",
            Node::List(_) => "list",
            Node::Dictionary(_) => "dictionary",
            Node::None => "none",
        }
    }

    // Validation helpers

    /// Get a required field from a dictionary, returning an error if not found
    pub fn get_required(&self, key: &str) -> Result<&Node, BencodeError> {
        self.get(key.as_bytes()).ok_or_else(|| BencodeError::MissingField {
            field: key.to_string(),
        })
    }

    /// Get a required integer field from a dictionary
    pub fn get_int_required(&self, key: &str) -> Result<i64, BencodeError> {
        self.get_required(key)?
            .as_integer()
            .ok_or_else(|| BencodeError::FieldType {
                field: key.to_string(),
                expected: "an integer",
            })
    }

    /// Get a required UTF-8 string field from a dictionary
    pub fn get_string_required(&self, key: &str) -> Result<&str, BencodeError> {
        self.get_required(key)?
            .as_string()
            .ok_or_else(|| BencodeError::FieldType {
                field: key.to_string(),
                expected: "a string",
            })
    }

    /// Get a required list field from a dictionary
    pub fn get_list_required(&self, key: &str) -> Result<&Vec<Node>, BencodeError> {
        self.get_required(key)?
            .as_list()
            .ok_or_else(|| BencodeError::FieldType {
                field: key.to_string(),
                expected: "a list",
            })
    }

    /// Get a required dictionary field from a dictionary
    pub fn get_dict_required(&self, key: &str) -> Result<&BTreeMap<Vec<u8>, Node>, BencodeError> {
        self.get_required(key)?
            .as_dictionary()
            .ok_or_else(|| BencodeError::FieldType {
                field: key.to_string(),
                expected: "a dictionary",
            })
    }

    /// Get an optional integer field, returning None if not found or not an integer
    pub fn get_int_optional(&self, key: &str) -> Option<i64> {
        self.get(key.as_bytes()).and_then(|node| node.as_integer())
    }

    /// Get an optional UTF-8 string field, returning None if not found or not a string
    pub fn get_string_optional(&self, key: &str) -> Option<&str> {
        self.get(key.as_bytes()).and_then(|node| node.as_string())
    }

    /// Get an optional list field, returning None if not found or not a list
    pub fn get_list_optional(&self, key: &str) -> Option<&Vec<Node>> {
        self.get(key.as_bytes()).and_then(|node| node.as_list())
    }

    /// Get an optional dictionary field, returning None if not found or not a dictionary
    pub fn get_dict_optional(&self, key: &str) -> Option<&BTreeMap<Vec<u8>, Node>> {
        self.get(key.as_bytes()).and_then(|node| node.as_dictionary())
    }
}

/// Converts a vector of values into a List node
impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(value: Vec<T>) -> Self {
        Node::List(value.into_iter().map(|x| x.into()).collect())
    }
}

/// Converts an integer into an Integer node
impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Integer(value)
    }
}

/// Converts a string slice into a Str node
impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Str(value.as_bytes().to_vec())
    }
}

/// Converts a String into a Str node
impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Str(value.into_bytes())
    }
}

/// Converts a byte slice into a Str node
impl From<&[u8]> for Node {
    fn from(value: &[u8]) -> Self {
        Node::Str(value.to_vec())
    }
}

/// Converts a map into a Dictionary node
impl From<BTreeMap<Vec<u8>, Node>> for Node {
    fn from(value: BTreeMap<Vec<u8>, Node>) -> Self {
        Node::Dictionary(value)
    }
}

// Allow creating a List node from a static array literal, e.g., Node::from([1, 2, 3])
impl<T, const N: usize> From<[T; N]> for Node
where
    T: Into<Node>,
{
    fn from(value: [T; N]) -> Self {
        Node::List(value.into_iter().map(|x| x.into()).collect())
    }
}

// Allow creating a Dictionary node from a static array of key-value pairs.
// e.g., Node::from([("a", 1), ("b", 2)])
impl<K, V, const N: usize> From<[(K, V); N]> for Node
where
    K: Into<Vec<u8>>,
    V: Into<Node>,
{
    fn from(value: [(K, V); N]) -> Self {
        let mut map: BTreeMap<Vec<u8>, Node> = BTreeMap::new();
        for (k, v) in value.into_iter() {
            map.insert(k.into(), v.into());
        }
        Node::Dictionary(map)
    }
}

/// Helper function to create a Node from any value that can be converted into a Node
pub fn make_node<T>(value: T) -> Node
where
    T: Into<Node>,
{
    value.into()
}

/// Implements Display trait for Node to provide human-readable string
/// representation. Byte strings are shown as lossy UTF-8.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Integer(integer) => write!(f, "{}", integer),
            Node::Str(bytes) => write!(f, "\"{}\"", String::from_utf8_lossy(bytes)),
            Node::List(list) => {
                write!(f, "[")?;
                for (index, item) in list.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Node::Dictionary(dict) => {
                write!(f, "{{")?;
                for (index, (key, value)) in dict.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{}\": {}", String::from_utf8_lossy(key), value)?;
                }
                write!(f, "}}")
            }
            Node::None => write!(f, "null"),
        }
    }
}
