//! Structural merge of two value trees.

use super::UnsupportedMergeError;
use crate::value::{Map, Value};
use std::borrow::Cow;
use tracing::{debug, trace};

/// Merges `second` into `first` and returns the combined tree.
///
/// Neither input is modified. The rules, by shape of `(first, second)`:
///
/// - `Null` on either side yields the other side.
/// - two lists: `first`, then every element of `second` not already in
///   `first`. Duplicates already inside either list are kept.
/// - a list and a non-list value: the value is appended to the list unless
///   an equal element is present. A scalar or map against a list always
///   lands in the list, whichever side it came from.
/// - two maps: every key from both sides. Keys present on both sides are
///   merged recursively. When the key equals `coerce_key`, both values are
///   first wrapped into lists (unless already lists) and merged as lists; if
///   the wrapped lists are equal the value from `first` is kept as is. The
///   coercion key only applies to the keys of the top-level maps.
/// - two scalars: equal values (with `1 == 1.0`) yield `first`, anything
///   else widens to `[first, second]`.
/// - a map against a scalar is an [`UnsupportedMergeError`].
///
/// List membership is a linear scan, so merging long lists is quadratic.
pub fn merge(
    first: &Value,
    second: &Value,
    coerce_key: Option<&str>,
) -> Result<Value, UnsupportedMergeError> {
    let mut path = Vec::new();
    merge_at(&mut path, first, second, coerce_key)
}

fn merge_at(
    path: &mut Vec<String>,
    first: &Value,
    second: &Value,
    coerce_key: Option<&str>,
) -> Result<Value, UnsupportedMergeError> {
    match (first, second) {
        (Value::Null, _) => Ok(second.clone()),
        (_, Value::Null) => Ok(first.clone()),
        (Value::List(left), Value::List(right)) => Ok(Value::List(union_lists(left, right))),
        (Value::List(list), item) | (item, Value::List(list)) => {
            Ok(Value::List(append_missing(path, list, item)))
        }
        (Value::Map(left), Value::Map(right)) => {
            merge_maps(path, left, right, coerce_key).map(Value::Map)
        }
        (Value::Map(_), _) | (_, Value::Map(_)) => {
            let err = UnsupportedMergeError::new(format_path(path), first.shape(), second.shape());
            debug!(error = %err, "unsupported merge");
            Err(err)
        }
        _ => Ok(merge_scalars(path, first, second)),
    }
}

fn merge_maps(
    path: &mut Vec<String>,
    left: &Map,
    right: &Map,
    coerce_key: Option<&str>,
) -> Result<Map, UnsupportedMergeError> {
    let mut merged = Map::with_capacity(left.len() + right.len());

    for (key, lvalue) in left {
        let value = match right.get(key) {
            None => lvalue.clone(),
            Some(rvalue) if coerce_key == Some(key.as_str()) => {
                coerce_records(path, key, lvalue, rvalue)
            }
            Some(rvalue) => {
                path.push(key.clone());
                let result = merge_at(path, lvalue, rvalue, None);
                path.pop();
                result?
            }
        };
        merged.set(key.clone(), value);
    }

    for (key, rvalue) in right {
        if !left.has(key) {
            merged.set(key.clone(), rvalue.clone());
        }
    }

    Ok(merged)
}

/// Merges the two values of the coercion key as lists of records.
fn coerce_records(path: &[String], key: &str, left: &Value, right: &Value) -> Value {
    let lrecords = as_records(left);
    let rrecords = as_records(right);
    if lrecords == rrecords {
        debug!(path = %format_path(path), key, "coercion key values already equal");
        return left.clone();
    }
    debug!(path = %format_path(path), key, "merging coercion key as list of records");
    Value::List(union_lists(&lrecords, &rrecords))
}

fn as_records(value: &Value) -> Cow<'_, [Value]> {
    match value {
        Value::List(list) => Cow::Borrowed(list),
        other => Cow::Owned(vec![other.clone()]),
    }
}

fn union_lists(left: &[Value], right: &[Value]) -> Vec<Value> {
    let mut merged = left.to_vec();
    merged.extend(right.iter().filter(|item| !left.contains(item)).cloned());
    merged
}

fn append_missing(path: &[String], list: &[Value], item: &Value) -> Vec<Value> {
    let mut merged = list.to_vec();
    if !list.contains(item) {
        trace!(path = %format_path(path), shape = %item.shape(), "appending to list");
        merged.push(item.clone());
    }
    merged
}

fn merge_scalars(path: &[String], first: &Value, second: &Value) -> Value {
    if first == second {
        return first.clone();
    }
    trace!(
        path = %format_path(path),
        first = %first.shape(),
        second = %second.shape(),
        "scalar conflict widened to list"
    );
    Value::List(vec![first.clone(), second.clone()])
}

fn format_path(path: &[String]) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    path.iter().map(|key| format!(".{}", key)).collect()
}
