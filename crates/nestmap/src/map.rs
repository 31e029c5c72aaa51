//! Recursive leaf mapping.

use serde_json::Value;

use crate::key::Key;

/// Return a tree of the same shape with every leaf replaced by `f(path, leaf)`.
///
/// Objects keep their key order and arrays their length. Empty nodes have no
/// leaves and are copied unchanged. A leaf root is mapped with an empty path.
///
/// # Examples
///
/// ```
/// use nestmap::map::map_leaves;
/// use serde_json::json;
///
/// let doubled = map_leaves(&json!({"a": 1, "b": [2, 3]}), |_, v| {
///     json!(v.as_i64().unwrap_or(0) * 2)
/// });
/// assert_eq!(doubled, json!({"a": 2, "b": [4, 6]}));
/// ```
pub fn map_leaves(tree: &Value, mut f: impl FnMut(&[Key], &Value) -> Value) -> Value {
    let mut path = Vec::new();
    map_node(tree, &mut path, &mut f)
}

fn map_node(
    value: &Value,
    path: &mut Vec<Key>,
    f: &mut impl FnMut(&[Key], &Value) -> Value,
) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    path.push(Key::Name(k.clone()));
                    let mapped = map_node(v, path, f);
                    path.pop();
                    (k.clone(), mapped)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    path.push(Key::Index(i));
                    let mapped = map_node(v, path, f);
                    path.pop();
                    mapped
                })
                .collect(),
        ),
        leaf => f(path, leaf),
    }
}
