//! SourceTree addressing helpers for the resolution pipeline.
//!
//! The tree is keyed by dotted leaf paths; nesting is expressed as nested
//! objects. Writes create intermediate objects as needed, so a per-leaf
//! environment override lands at the same address as its file counterpart.

use serde_json::{Map, Value};

/// Write `value` at a dotted key path, creating intermediate objects.
///
/// An existing value at the path is replaced; a non-object intermediate is
/// replaced by an object so the leaf always has a well-formed address.
pub(super) fn insert_at_path(tree: &mut Map<String, Value>, key_path: &str, value: Value) {
    match key_path.split_once('.') {
        None => {
            tree.insert(key_path.to_string(), value);
        }
        Some((head, rest)) => {
            let entry = tree
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !matches!(entry, Value::Object(_)) {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(child) = entry {
                insert_at_path(child, rest, value);
            }
        }
    }
}

/// Read the value at a dotted key path, if any.
pub(super) fn value_at_path<'a>(tree: &'a Map<String, Value>, key_path: &str) -> Option<&'a Value> {
    match key_path.split_once('.') {
        None => tree.get(key_path),
        Some((head, rest)) => match tree.get(head)? {
            Value::Object(child) => value_at_path(child, rest),
            _ => None,
        },
    }
}
