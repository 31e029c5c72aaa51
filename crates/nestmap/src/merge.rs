//! Distinct recursive merge of two trees.
//!
//! Unlike a naive recursive merge, colliding leaves are never collected into
//! lists: the overlay value simply replaces the base value. Recursion happens
//! wherever both sides hold a node under the same key. An object meeting an
//! array sees the array as an object keyed by decimal index.

use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{NestError, Result};
use crate::key::{indexed, is_node, type_name};

/// Merge `overlay` into a copy of `base`.
///
/// - Objects merge by member name. Base members keep their position;
///   overlay-only members are appended in overlay order.
/// - Arrays merge by index. Overlay elements past the end of `base` are
///   appended.
/// - An object meeting an array merges by key, with the array viewed as an
///   object keyed `"0"`, `"1"`, ...; the result is an object.
/// - Where both sides hold nodes under the same key, the merge recurses.
///   Anywhere else the overlay value wins.
///
/// Neither input is modified.
///
/// # Errors
///
/// Returns [`NestError::TypeMismatch`] if either argument is a leaf.
///
/// # Examples
///
/// ```
/// use nestmap::merge::merge;
/// use serde_json::json;
///
/// let merged = merge(&json!({"a": {"x": 1}}), &json!({"a": {"y": 2}, "b": 3})).unwrap();
/// assert_eq!(merged, json!({"a": {"x": 1, "y": 2}, "b": 3}));
///
/// let merged = merge(&json!({"x": 1}), &json!([5])).unwrap();
/// assert_eq!(merged, json!({"x": 1, "0": 5}));
/// ```
pub fn merge(base: &Value, overlay: &Value) -> Result<Value> {
    for side in [base, overlay] {
        if !is_node(side) {
            return Err(NestError::TypeMismatch {
                expected: "object or array",
                found: type_name(side),
            });
        }
    }
    Ok(merge_values(base, overlay))
}

/// Fold [`merge`] left to right over `nodes`.
///
/// An empty input yields an empty object.
pub fn merge_all<'a>(nodes: impl IntoIterator<Item = &'a Value>) -> Result<Value> {
    let mut nodes = nodes.into_iter();
    let Some(first) = nodes.next() else {
        return Ok(Value::Object(Map::new()));
    };
    // Validate a lone argument the same way a pairwise merge would.
    let mut acc = merge(first, &empty_like(first))?;
    for node in nodes {
        acc = merge(&acc, node)?;
    }
    Ok(acc)
}

fn empty_like(value: &Value) -> Value {
    match value {
        Value::Array(_) => Value::Array(Vec::new()),
        _ => Value::Object(Map::new()),
    }
}

fn merge_objects(base: &Map<String, Value>, overlay: &Map<String, Value>) -> Map<String, Value> {
    let mut out = base.clone();
    for (key, incoming) in overlay {
        let merged = match out.get(key) {
            Some(existing) => merge_values(existing, incoming),
            None => incoming.clone(),
        };
        out.insert(key.clone(), merged);
    }
    out
}

fn merge_arrays(base: &[Value], overlay: &[Value]) -> Vec<Value> {
    let mut out = base.to_vec();
    for (i, incoming) in overlay.iter().enumerate() {
        match out.get_mut(i) {
            Some(slot) => *slot = merge_values(slot, incoming),
            None => out.push(incoming.clone()),
        }
    }
    out
}

fn merge_values(existing: &Value, incoming: &Value) -> Value {
    match (existing, incoming) {
        (Value::Object(b), Value::Object(o)) => Value::Object(merge_objects(b, o)),
        (Value::Array(b), Value::Array(o)) => Value::Array(merge_arrays(b, o)),
        (Value::Object(b), Value::Array(o)) => {
            Value::Object(merge_objects(b, &indexed(o.clone())))
        }
        (Value::Array(b), Value::Object(o)) => {
            Value::Object(merge_objects(&indexed(b.clone()), o))
        }
        _ => {
            trace!(
                from = type_name(existing),
                to = type_name(incoming),
                "merge: overlay replaces base value"
            );
            incoming.clone()
        }
    }
}
