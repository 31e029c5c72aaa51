//! Stack-safe traversal of nested trees.
//!
//! [`walk`] visits every (key, value) pair below a root without recursing on
//! the native call stack. Pending siblings are kept as child iterators on a
//! heap-allocated stack, so native stack usage stays constant no matter how
//! deep the tree is, at the cost of heap usage proportional to depth.
//!
//! Visits come out in document order: pre-order depth-first, each level in
//! insertion order. Every visit carries its depth, which is enough for a
//! consumer to rebuild full paths incrementally. [`Walk::with_paths`] does
//! that and yields [`PathVisit`]s carrying the full node path.

use serde_json::Value;

use crate::key::Key;

/// A single visited child.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit<'a> {
    /// The key under which `value` sits in its parent.
    pub key: Key,
    /// The visited value (leaf or node).
    pub value: &'a Value,
    /// Number of ancestors between the root and `value`'s parent.
    /// Direct children of the root have depth 0.
    pub depth: usize,
}

/// Iterator over the direct children of one node.
enum Children<'a> {
    Object(serde_json::map::Iter<'a>),
    Array(std::iter::Enumerate<std::slice::Iter<'a, Value>>),
}

impl<'a> Children<'a> {
    fn of(value: &'a Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Children::Object(map.iter())),
            Value::Array(items) => Some(Children::Array(items.iter().enumerate())),
            _ => None,
        }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = (Key, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Children::Object(iter) => iter.next().map(|(k, v)| (Key::Name(k.clone()), v)),
            Children::Array(iter) => iter.next().map(|(i, v)| (Key::Index(i), v)),
        }
    }
}

/// Lazy, single-pass traversal returned by [`walk`].
pub struct Walk<'a> {
    stack: Vec<Children<'a>>,
}

/// Walk every descendant of `root` in document order.
///
/// The root itself is not yielded. A leaf root yields nothing.
///
/// # Examples
///
/// ```
/// use nestmap::walk::walk;
/// use serde_json::json;
///
/// let tree = json!({"a": {"b": 1}, "c": [2]});
/// let keys: Vec<String> = walk(&tree).map(|v| v.key.to_string()).collect();
/// assert_eq!(keys, vec!["a", "b", "c", "0"]);
/// ```
pub fn walk(root: &Value) -> Walk<'_> {
    Walk {
        stack: Children::of(root).into_iter().collect(),
    }
}

/// A visited child together with its full path from the root.
#[derive(Debug, Clone, PartialEq)]
pub struct PathVisit<'a> {
    /// Keys from the root down to `value`, inclusive.
    pub path: Vec<Key>,
    pub value: &'a Value,
}

impl PathVisit<'_> {
    /// The key under which `value` sits in its parent.
    pub fn key(&self) -> Option<&Key> {
        self.path.last()
    }

    /// Path of the parent node. Empty for direct children of the root.
    pub fn parent(&self) -> &[Key] {
        self.path.split_last().map_or(&[][..], |(_, parent)| parent)
    }
}

impl<'a> Walk<'a> {
    /// Adapt this walk to yield the full path of every visited value.
    ///
    /// Each item clones the current path, so this costs O(depth) per visit.
    pub fn with_paths(self) -> Paths<'a> {
        Paths {
            walk: self,
            path: Vec::new(),
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            let top = self.stack.last_mut()?;
            match top.next() {
                Some((key, value)) => {
                    if let Some(children) = Children::of(value) {
                        self.stack.push(children);
                    }
                    return Some(Visit { key, value, depth });
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Path-yielding adapter returned by [`Walk::with_paths`].
pub struct Paths<'a> {
    walk: Walk<'a>,
    path: Vec<Key>,
}

impl<'a> Iterator for Paths<'a> {
    type Item = PathVisit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let visit = self.walk.next()?;
        self.path.truncate(visit.depth);
        self.path.push(visit.key);
        Some(PathVisit {
            path: self.path.clone(),
            value: visit.value,
        })
    }
}
