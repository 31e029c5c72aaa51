//! Dot-notation codec between nested trees and flat path maps.
//!
//! [`flatten`] turns `{"a": {"b": 1}}` into `{"a.b": 1}`; [`unflatten`] goes
//! the other way by applying [`set_path`] once per entry.
//!
//! # Known limitations
//!
//! - Separators inside original keys are not escaped. `{"a.b": 1}` and
//!   `{"a": {"b": 1}}` flatten to the same entry. Pick a separator that
//!   cannot occur in your keys ([`CodecOptions::with_separator`]).
//! - [`unflatten`] always builds objects, so arrays come back as objects
//!   keyed `"0"`, `"1"`, ... unless the target already holds an array.
//! - Empty nodes flatten to themselves as leaf-like entries and come back
//!   as empty nodes.

use std::convert::Infallible;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{NestError, Result};
use crate::key::{indexed, is_non_empty_node, is_node, type_name};

/// A flattened tree: separator-joined path → leaf (or empty node).
pub type FlatMap = Map<String, Value>;

/// Path separator used by [`flatten`], [`set_path`] and [`unflatten`].
pub const DEFAULT_SEPARATOR: &str = ".";

/// What [`set_path_with`] does when an intermediate segment holds a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ConflictPolicy {
    /// Replace the leaf with an empty object and keep descending.
    #[default]
    Overwrite,
    /// Fail with [`NestError::PathConflict`] and leave the tree untouched.
    Reject,
}

/// Options for the `*_with` codec functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecOptions {
    /// Joins path segments. An empty separator disables splitting.
    pub separator: String,
    /// Prepended verbatim to every flattened key and stripped again on unflatten.
    pub prefix: String,
    /// Policy for leaves found in the middle of a path.
    pub conflict: ConflictPolicy,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            prefix: String::new(),
            conflict: ConflictPolicy::default(),
        }
    }
}

impl CodecOptions {
    /// Use `separator` between path segments instead of `"."`.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Prefix every flattened key with `prefix`; unflatten strips it again.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Choose what happens when a path runs through a leaf.
    pub fn with_conflict(mut self, conflict: ConflictPolicy) -> Self {
        self.conflict = conflict;
        self
    }
}

// ── flatten ─────────────────────────────────────────────────────────────────

/// Flatten a tree into a map of dot-joined paths.
///
/// Entries come out in document order. Non-empty nodes are descended into;
/// leaves and empty nodes are emitted as they are. Array elements use their
/// decimal index as the path segment.
///
/// # Errors
///
/// Returns [`NestError::TypeMismatch`] if `tree` is a leaf.
///
/// # Examples
///
/// ```
/// use nestmap::codec::flatten;
/// use serde_json::json;
///
/// let flat = flatten(&json!({"foo": {"bar": "baz"}, "far": {"boo": {"fad": "faz"}}})).unwrap();
/// assert_eq!(flat["foo.bar"], json!("baz"));
/// assert_eq!(flat["far.boo.fad"], json!("faz"));
/// ```
pub fn flatten(tree: &Value) -> Result<FlatMap> {
    flatten_with(tree, &CodecOptions::default())
}

/// Flatten an object. Infallible counterpart of [`flatten`].
pub fn flatten_map(map: &Map<String, Value>) -> FlatMap {
    let mut out = FlatMap::new();
    for (key, value) in map {
        flatten_entry(key.clone(), value, DEFAULT_SEPARATOR, &mut out);
    }
    out
}

/// [`flatten`] with a custom separator and key prefix.
pub fn flatten_with(tree: &Value, options: &CodecOptions) -> Result<FlatMap> {
    if !is_node(tree) {
        return Err(NestError::TypeMismatch {
            expected: "object or array",
            found: type_name(tree),
        });
    }
    let mut out = FlatMap::new();
    flatten_children(tree, &options.prefix, &options.separator, &mut out);
    Ok(out)
}

fn flatten_children(node: &Value, prefix: &str, separator: &str, out: &mut FlatMap) {
    match node {
        Value::Object(map) => {
            for (key, value) in map {
                flatten_entry(format!("{prefix}{key}"), value, separator, out);
            }
        }
        Value::Array(items) => {
            for (i, value) in items.iter().enumerate() {
                flatten_entry(format!("{prefix}{i}"), value, separator, out);
            }
        }
        _ => {}
    }
}

fn flatten_entry(path: String, value: &Value, separator: &str, out: &mut FlatMap) {
    if is_non_empty_node(value) {
        let prefix = format!("{path}{separator}");
        flatten_children(value, &prefix, separator, out);
    } else {
        out.insert(path, value.clone());
    }
}

// ── set_path ────────────────────────────────────────────────────────────────

/// Return a copy of `tree` with `value` stored at the dot-joined `key`.
///
/// Missing intermediate objects are created. A leaf found at an
/// intermediate segment is replaced by an empty object, losing the old
/// value; use [`set_path_with`] and [`ConflictPolicy::Reject`] to refuse
/// instead.
///
/// # Examples
///
/// ```
/// use nestmap::codec::set_path;
/// use serde_json::json;
///
/// let tree = set_path(&json!({"a": {"x": 1}}), "a.b.c", json!(2));
/// assert_eq!(tree, json!({"a": {"x": 1, "b": {"c": 2}}}));
/// ```
pub fn set_path(tree: &Value, key: &str, value: Value) -> Value {
    let mut out = tree.clone();
    overwrite(&mut out, key, value, DEFAULT_SEPARATOR);
    out
}

/// [`set_path`] with a custom separator and conflict policy.
///
/// # Errors
///
/// With [`ConflictPolicy::Reject`], returns [`NestError::PathConflict`] if a
/// leaf sits where the path needs a node.
pub fn set_path_with(tree: &Value, key: &str, value: Value, options: &CodecOptions) -> Result<Value> {
    let mut out = tree.clone();
    set_path_in_place(&mut out, key, value, options)?;
    Ok(out)
}

/// Store `value` at `key` inside `tree` itself.
///
/// On error the tree may already hold the intermediate objects created
/// before the conflicting segment.
pub fn set_path_in_place(
    tree: &mut Value,
    key: &str,
    value: Value,
    options: &CodecOptions,
) -> Result<()> {
    match options.conflict {
        ConflictPolicy::Overwrite => {
            overwrite(tree, key, value, &options.separator);
            Ok(())
        }
        ConflictPolicy::Reject => assign(tree, key, value, &options.separator, |path, found| {
            Err(NestError::PathConflict {
                path: path.to_string(),
                found: type_name(found),
            })
        }),
    }
}

fn overwrite(tree: &mut Value, key: &str, value: Value, separator: &str) {
    let Ok(()) = assign::<Infallible>(tree, key, value, separator, |_, _| Ok(()));
}

/// Walk `key` down from `root`, creating nodes as needed, and store `value`.
///
/// `on_conflict` is consulted before a pre-existing leaf on the way down is
/// replaced by an empty object.
fn assign<E>(
    root: &mut Value,
    key: &str,
    value: Value,
    separator: &str,
    mut on_conflict: impl FnMut(&str, &Value) -> std::result::Result<(), E>,
) -> std::result::Result<(), E> {
    let segments: Vec<&str> = if separator.is_empty() {
        vec![key]
    } else {
        key.split(separator).collect()
    };
    let Some((last, parents)) = segments.split_last() else {
        return Ok(());
    };

    let mut walked = String::new();
    ensure_node(root, false, &walked, &mut on_conflict)?;

    let mut cursor = root;
    for segment in parents {
        if !walked.is_empty() {
            walked.push_str(separator);
        }
        walked.push_str(segment);
        let (next, created) = child_slot(cursor, segment);
        ensure_node(next, created, &walked, &mut on_conflict)?;
        cursor = next;
    }

    let (slot, _) = child_slot(cursor, last);
    *slot = value;
    Ok(())
}

fn ensure_node<E>(
    slot: &mut Value,
    created: bool,
    path: &str,
    on_conflict: &mut impl FnMut(&str, &Value) -> std::result::Result<(), E>,
) -> std::result::Result<(), E> {
    if is_node(slot) {
        return Ok(());
    }
    if !created {
        on_conflict(path, slot)?;
        debug!(path, found = type_name(slot), "set_path: replacing leaf with an empty object");
    }
    *slot = Value::Object(Map::new());
    Ok(())
}

/// The slot for `segment` under `node`, and whether it was just created.
///
/// Arrays accept a canonical in-range index or `len` (append). Any other
/// segment turns the array into an object keyed by decimal index first.
fn child_slot<'a>(node: &'a mut Value, segment: &str) -> (&'a mut Value, bool) {
    let index = match &*node {
        Value::Array(items) => array_index(segment, items.len()),
        _ => None,
    };
    match (index, node) {
        (Some(i), Value::Array(items)) => {
            let created = i == items.len();
            if created {
                items.push(Value::Null);
            }
            (&mut items[i], created)
        }
        (_, other) => {
            let map = object_mut(other);
            let created = !map.contains_key(segment);
            (map.entry(segment).or_insert(Value::Null), created)
        }
    }
}

fn array_index(segment: &str, len: usize) -> Option<usize> {
    segment
        .parse::<usize>()
        .ok()
        .filter(|i| *i <= len && i.to_string() == segment)
}

fn object_mut(node: &mut Value) -> &mut Map<String, Value> {
    match node {
        Value::Object(map) => map,
        other => {
            let converted = match other.take() {
                Value::Array(items) => indexed(items),
                _ => Map::new(),
            };
            *other = Value::Object(converted);
            object_mut(other)
        }
    }
}

// ── unflatten ───────────────────────────────────────────────────────────────

/// Rebuild a tree from a flat path map.
///
/// Entries are applied in iteration order with [`set_path`] semantics, so
/// when paths collide at a prefix (`"a"` then `"a.b"`) the later entry wins.
///
/// # Examples
///
/// ```
/// use nestmap::codec::{flatten, unflatten};
/// use serde_json::json;
///
/// let tree = json!({"a": {"b": 1, "c": {"d": true}}, "e": "x"});
/// assert_eq!(unflatten(&flatten(&tree).unwrap()), tree);
/// ```
pub fn unflatten(flat: &FlatMap) -> Value {
    let mut root = Value::Object(Map::new());
    for (key, value) in flat {
        overwrite(&mut root, key, value.clone(), DEFAULT_SEPARATOR);
    }
    root
}

/// [`unflatten`] with a custom separator, prefix and conflict policy.
///
/// Keys starting with the configured prefix have it stripped; other keys
/// are used verbatim.
pub fn unflatten_with(flat: &FlatMap, options: &CodecOptions) -> Result<Value> {
    let mut root = Value::Object(Map::new());
    for (key, value) in flat {
        let key = key.strip_prefix(options.prefix.as_str()).unwrap_or(key);
        set_path_in_place(&mut root, key, value.clone(), options)?;
    }
    Ok(root)
}
