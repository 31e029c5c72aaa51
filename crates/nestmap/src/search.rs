//! Deep search for values and keys anywhere in a nested tree.
//!
//! Both searches run on [`walk`](crate::walk::walk), so they are safe on
//! arbitrarily deep trees and stop at the first match. Equality is strict:
//! `1`, `1.0` and `"1"` are three different values.

use serde_json::Value;

use crate::key::Key;
use crate::walk::{walk, Visit};

/// Whether `needle` appears anywhere below `haystack`.
///
/// The root is not itself a candidate, so a leaf haystack never contains
/// anything. A node needle matches a structurally equal subtree.
///
/// # Examples
///
/// ```
/// use nestmap::search::find_value;
/// use serde_json::json;
///
/// let tree = json!({"a": {"b": [1, "two"]}});
/// assert!(find_value(&json!("two"), &tree));
/// assert!(!find_value(&json!("1"), &tree));
/// ```
pub fn find_value(needle: &Value, haystack: &Value) -> bool {
    walk(haystack).any(|visit| visit.value == needle)
}

/// Whether some node below or at `haystack` has a direct child keyed `needle`.
///
/// Names only match object members and indices only match array elements.
pub fn find_key(needle: impl Into<Key>, haystack: &Value) -> bool {
    let needle = needle.into();
    walk(haystack).any(|visit| visit.key == needle)
}

/// Path to the first occurrence of `needle` in document order.
pub fn locate_value(needle: &Value, haystack: &Value) -> Option<Vec<Key>> {
    locate(haystack, |visit| visit.value == needle)
}

/// Path to the first child keyed `needle` in document order.
pub fn locate_key(needle: impl Into<Key>, haystack: &Value) -> Option<Vec<Key>> {
    let needle = needle.into();
    locate(haystack, |visit| visit.key == needle)
}

fn locate<'a>(haystack: &'a Value, mut matches: impl FnMut(&Visit<'a>) -> bool) -> Option<Vec<Key>> {
    let mut path = Vec::new();
    for visit in walk(haystack) {
        path.truncate(visit.depth);
        let found = matches(&visit);
        path.push(visit.key);
        if found {
            return Some(path);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::join_path;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "name": "root",
            "meta": {"tags": ["red", "blue"], "count": 2},
            "items": [
                {"id": 1, "flag": true},
                {"id": 2, "flag": null, "nested": {"deep": "needle"}}
            ]
        })
    }

    // ── find_value ─────────────────────────────────────────────────────

    #[test]
    fn test_find_value_top_level_and_nested() {
        let tree = sample();
        assert!(find_value(&json!("root"), &tree));
        assert!(find_value(&json!("blue"), &tree));
        assert!(find_value(&json!("needle"), &tree));
        assert!(find_value(&json!(null), &tree));
    }

    #[test]
    fn test_find_value_is_strict() {
        let tree = sample();
        assert!(find_value(&json!(2), &tree));
        assert!(!find_value(&json!("2"), &tree));
        assert!(!find_value(&json!(2.0), &tree));
        assert!(!find_value(&json!(1), &json!({"a": true})));
        assert!(!find_value(&json!(false), &json!({"a": 0})));
    }

    #[test]
    fn test_find_value_matches_subtree() {
        let tree = sample();
        assert!(find_value(&json!(["red", "blue"]), &tree));
        assert!(!find_value(&json!(["blue", "red"]), &tree));
    }

    #[test]
    fn test_find_value_absent_is_false() {
        assert!(!find_value(&json!("missing"), &sample()));
        assert!(!find_value(&json!(1), &json!({})));
        assert!(!find_value(&json!(1), &json!(1)));
    }

    // ── find_key ───────────────────────────────────────────────────────

    #[test]
    fn test_find_key_names() {
        let tree = sample();
        assert!(find_key("name", &tree));
        assert!(find_key("deep", &tree));
        assert!(find_key("flag", &tree));
        assert!(!find_key("needle", &tree));
    }

    #[test]
    fn test_find_key_indices() {
        let tree = sample();
        assert!(find_key(1usize, &tree));
        assert!(!find_key(5usize, &tree));
        // "0" is a name, and no object has a member called "0"
        assert!(!find_key("0", &tree));
    }

    // ── locate ─────────────────────────────────────────────────────────

    #[test]
    fn test_locate_value_returns_path() {
        let path = locate_value(&json!("needle"), &sample()).unwrap();
        assert_eq!(join_path(&path, "."), "items.1.nested.deep");
    }

    #[test]
    fn test_locate_first_match_in_document_order() {
        let tree = json!({"a": {"x": 1}, "b": {"x": 1}});
        let path = locate_value(&json!(1), &tree).unwrap();
        assert_eq!(join_path(&path, "."), "a.x");
        let path = locate_key("x", &tree).unwrap();
        assert_eq!(join_path(&path, "."), "a.x");
    }

    #[test]
    fn test_locate_after_backtracking() {
        let tree = json!({"a": {"b": {"c": 1}}, "d": {"e": 2}});
        let path = locate_value(&json!(2), &tree).unwrap();
        assert_eq!(path, vec![Key::from("d"), Key::from("e")]);
    }

    #[test]
    fn test_locate_missing_is_none() {
        assert_eq!(locate_key("zzz", &sample()), None);
        assert_eq!(locate_value(&json!(99), &sample()), None);
    }
}
