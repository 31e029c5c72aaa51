//! Keys and paths addressing positions inside a nested tree.
//!
//! Object members are addressed by [`Key::Name`], array elements by
//! [`Key::Index`]. A path is a sequence of keys from the root down.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// One step from a node to one of its direct children.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Key {
    /// A member of an object.
    Name(String),
    /// An element of an array.
    Index(usize),
}

impl Key {
    /// Look up this key among the direct children of `node`.
    ///
    /// Returns `None` for leaves, for a name on an array, for an index on
    /// an object, and for keys that are simply absent.
    pub fn get<'a>(&self, node: &'a Value) -> Option<&'a Value> {
        match (self, node) {
            (Key::Name(name), Value::Object(map)) => map.get(name),
            (Key::Index(i), Value::Array(items)) => items.get(*i),
            _ => None,
        }
    }

    /// The key as path-segment text.
    pub fn segment(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => f.write_str(name),
            Key::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Name(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Name(s)
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Index(i)
    }
}

/// Join a path into its separator-delimited text form (`["a", 0, "b"]` → `"a.0.b"`).
pub fn join_path(path: &[Key], separator: &str) -> String {
    let mut out = String::new();
    for (i, key) in path.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        out.push_str(&key.segment());
    }
    out
}

/// View an array as an object keyed by decimal index (`[a, b]` → `{"0": a, "1": b}`).
pub(crate) fn indexed(items: Vec<Value>) -> Map<String, Value> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, v)| (i.to_string(), v))
        .collect()
}

/// Short type name of a value, used in error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Whether a value is a node (object or array) rather than a leaf.
pub fn is_node(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Whether a value is a node with at least one child.
pub fn is_non_empty_node(value: &Value) -> bool {
    match value {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => false,
    }
}
