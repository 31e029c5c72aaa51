//! Positional accessors and record extraction.
//!
//! Small helpers over sequences and lists of records. Positional accessors
//! work on any slice; [`pluck`] and [`inject`] work on records that are
//! objects (addressed by name) or arrays (addressed by index).

use serde_json::Value;

use crate::error::{NestError, Result};
use crate::key::{type_name, Key};

/// The first element of `seq`.
///
/// # Errors
///
/// Returns [`NestError::EmptyInput`] if `seq` is empty.
pub fn first<T>(seq: &[T]) -> Result<&T> {
    seq.first()
        .ok_or_else(|| NestError::EmptyInput("first of an empty sequence".to_string()))
}

/// The last element of `seq`.
///
/// # Errors
///
/// Returns [`NestError::EmptyInput`] if `seq` is empty.
pub fn last<T>(seq: &[T]) -> Result<&T> {
    seq.last()
        .ok_or_else(|| NestError::EmptyInput("last of an empty sequence".to_string()))
}

/// The element at index `len / 2` (zero-based, rounded down).
///
/// For even lengths this is the element just past the midpoint, not an
/// average: `[1, 2, 3, 4]` gives `3`.
///
/// # Errors
///
/// Returns [`NestError::EmptyInput`] if `seq` is empty.
pub fn middle<T>(seq: &[T]) -> Result<&T> {
    seq.get(seq.len() / 2)
        .ok_or_else(|| NestError::EmptyInput("middle of an empty sequence".to_string()))
}

/// Extract the value under `key` from every record.
///
/// # Errors
///
/// Returns [`NestError::KeyNotFound`] if any record lacks `key`, including
/// records that are leaves.
///
/// # Examples
///
/// ```
/// use nestmap::access::pluck;
/// use serde_json::json;
///
/// let people = [json!({"name": "John", "age": 21}), json!({"name": "Jane", "age": 22})];
/// assert_eq!(pluck(&people, "name").unwrap(), vec![json!("John"), json!("Jane")]);
/// ```
pub fn pluck(records: &[Value], key: impl Into<Key>) -> Result<Vec<Value>> {
    let key = key.into();
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            key.get(record)
                .cloned()
                .ok_or_else(|| NestError::KeyNotFound(format!("'{key}' in record {i}")))
        })
        .collect()
}

/// Copies of `records` with `key` set to `value` in each.
///
/// Object records get the member inserted or replaced. Array records accept
/// an in-range index (replace) or the array length (append).
///
/// # Errors
///
/// Returns [`NestError::TypeMismatch`] for a leaf record, or a name used on an
/// array (and vice versa). Returns [`NestError::KeyNotFound`] for an array
/// index past the end.
pub fn inject(records: &[Value], key: impl Into<Key>, value: Value) -> Result<Vec<Value>> {
    let key = key.into();
    records
        .iter()
        .map(|record| {
            let mut record = record.clone();
            match (&key, &mut record) {
                (Key::Name(name), Value::Object(map)) => {
                    map.insert(name.clone(), value.clone());
                }
                (Key::Index(i), Value::Array(items)) => {
                    let len = items.len();
                    if *i < len {
                        items[*i] = value.clone();
                    } else if *i == len {
                        items.push(value.clone());
                    } else {
                        return Err(NestError::KeyNotFound(format!(
                            "index {i} in array of length {len}"
                        )));
                    }
                }
                (Key::Name(_), other) => {
                    return Err(NestError::TypeMismatch {
                        expected: "object",
                        found: type_name(other),
                    })
                }
                (Key::Index(_), other) => {
                    return Err(NestError::TypeMismatch {
                        expected: "array",
                        found: type_name(other),
                    })
                }
            }
            Ok(record)
        })
        .collect()
}

/// Push `values` onto the front of `seq`, dropping as many elements off the
/// back, and return the dropped elements in their original order.
///
/// The length of `seq` never changes. An empty `values` is a no-op.
///
/// # Errors
///
/// Returns [`NestError::CapacityExceeded`] (leaving `seq` untouched) if there
/// are more values than elements.
///
/// # Examples
///
/// ```
/// use nestmap::access::shove;
///
/// let mut seq = vec![1, 2, 3, 4, 5];
/// let popped = shove(&mut seq, vec![10, 20]).unwrap();
/// assert_eq!(seq, vec![10, 20, 1, 2, 3]);
/// assert_eq!(popped, vec![4, 5]);
/// ```
pub fn shove<T>(seq: &mut Vec<T>, values: Vec<T>) -> Result<Vec<T>> {
    if values.len() > seq.len() {
        return Err(NestError::CapacityExceeded {
            requested: values.len(),
            available: seq.len(),
        });
    }
    let popped = seq.split_off(seq.len() - values.len());
    let kept = std::mem::replace(seq, values);
    seq.extend(kept);
    Ok(popped)
}
