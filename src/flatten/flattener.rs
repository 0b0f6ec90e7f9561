//! Path flattening of nested maps.

use crate::value::{Map, Value};

/// Default separator placed between the keys of a flattened path.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Converts a nested map into a one-level map from key paths to leaf values.
///
/// Nested maps are descended into and their keys joined to the parent key
/// with `separator`. Every other value, lists included, is a leaf. A nested
/// empty map has no leaves and therefore produces no entry.
///
/// If two paths end up with the same composite key (the separator occurs
/// inside a key name), the later one wins.
pub fn flatten(map: &Map, separator: &str) -> Map {
    let mut out = Map::with_capacity(map.len());
    flatten_into(&mut out, None, map, separator);
    out
}

fn flatten_into(out: &mut Map, prefix: Option<&str>, map: &Map, separator: &str) {
    for (key, value) in map {
        let path = match prefix {
            Some(prefix) => format!("{}{}{}", prefix, separator, key),
            None => key.clone(),
        };
        match value {
            Value::Map(nested) => flatten_into(out, Some(&path), nested, separator),
            leaf => out.set(path, leaf.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::from_json;
    use pretty_assertions::assert_eq;

    fn parse_map(json: &str) -> Map {
        match from_json(json).unwrap() {
            Value::Map(m) => m,
            other => panic!("expected a map, got {:?}", other),
        }
    }

    fn keys(map: &Map) -> Vec<&str> {
        map.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_flatten_nested() {
        let flat = flatten(&parse_map(r#"{"a": {"b": 1, "c": 2}}"#), DEFAULT_SEPARATOR);
        assert_eq!(flat, parse_map(r#"{"a.b": 1, "a.c": 2}"#));
    }

    #[test]
    fn test_flatten_deep_and_order() {
        let input = parse_map(
            r#"{"z": 0, "meta": {"owner": {"name": "x", "id": 7}, "kind": "file"}, "a": true}"#,
        );
        let flat = flatten(&input, DEFAULT_SEPARATOR);
        assert_eq!(
            keys(&flat),
            vec!["z", "meta.owner.name", "meta.owner.id", "meta.kind", "a"]
        );
        assert_eq!(flat.get("meta.owner.id"), Some(&Value::Int(7)));
    }

    #[test]
    fn test_flatten_leaves_lists_intact() {
        let flat = flatten(
            &parse_map(r#"{"a": [1, 2], "b": [{"c": 1}]}"#),
            DEFAULT_SEPARATOR,
        );
        assert_eq!(flat, parse_map(r#"{"a": [1, 2], "b": [{"c": 1}]}"#));
    }

    #[test]
    fn test_flatten_custom_separator() {
        let flat = flatten(&parse_map(r#"{"a": {"b": {"c": null}}}"#), "__");
        assert_eq!(keys(&flat), vec!["a__b__c"]);
        assert_eq!(flat.get("a__b__c"), Some(&Value::Null));
    }

    #[test]
    fn test_flatten_empty() {
        assert!(flatten(&Map::new(), DEFAULT_SEPARATOR).is_empty());

        let flat = flatten(&parse_map(r#"{"a": {}, "b": 1}"#), DEFAULT_SEPARATOR);
        assert_eq!(flat, parse_map(r#"{"b": 1}"#));
    }

    #[test]
    fn test_flatten_collision_last_wins() {
        let flat = flatten(&parse_map(r#"{"a.b": 1, "a": {"b": 2}}"#), DEFAULT_SEPARATOR);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat.get("a.b"), Some(&Value::Int(2)));

        let flat = flatten(&parse_map(r#"{"a": {"b": 2}, "a.b": 1}"#), DEFAULT_SEPARATOR);
        assert_eq!(flat.get("a.b"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_flatten_leaves_input_untouched() {
        let input = parse_map(r#"{"a": {"b": 1}}"#);
        let before = input.clone();
        let _ = flatten(&input, DEFAULT_SEPARATOR);
        assert_eq!(input, before);
    }
}
