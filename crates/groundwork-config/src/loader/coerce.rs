//! Scalar coercion between source values and declared leaf kinds.

use serde_json::Value;

use crate::schema::LeafKind;

/// Coerce a raw environment string into a typed tree value.
pub(super) fn coerce_env(raw: &str, kind: LeafKind) -> Result<Value, String> {
    match kind {
        LeafKind::Str => Ok(Value::String(raw.to_string())),
        LeafKind::Int => raw
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| format!("expected integer, got {raw:?}")),
        LeafKind::Bool => parse_bool(raw)
            .map(Value::Bool)
            .ok_or_else(|| format!("expected boolean, got {raw:?}")),
    }
}

/// Normalize a tree value to the declared leaf kind.
///
/// Returns `Some(replacement)` when the stored value should be rewritten,
/// `None` when it already matches (or is null, which the default and
/// validation stages treat as absent). A value that cannot be coerced is an
/// unmarshal error for the offending leaf.
pub(super) fn normalize(value: &Value, kind: LeafKind) -> Result<Option<Value>, String> {
    match (kind, value) {
        (_, Value::Null) => Ok(None),
        (LeafKind::Str, Value::String(_)) => Ok(None),
        (LeafKind::Str, Value::Number(n)) => Ok(Some(Value::String(n.to_string()))),
        (LeafKind::Str, Value::Bool(b)) => Ok(Some(Value::String(b.to_string()))),
        (LeafKind::Int, Value::Number(n)) => {
            if n.as_i64().is_some() {
                Ok(None)
            } else {
                Err(format!("expected integer, got {n}"))
            }
        }
        (LeafKind::Int, Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(|n| Some(Value::from(n)))
            .map_err(|_| format!("expected integer, got {s:?}")),
        (LeafKind::Bool, Value::Bool(_)) => Ok(None),
        (LeafKind::Bool, Value::String(s)) => parse_bool(s)
            .map(|b| Some(Value::Bool(b)))
            .ok_or_else(|| format!("expected boolean, got {s:?}")),
        (kind, other) => Err(format!("expected {}, got {other}", kind_name(kind))),
    }
}

fn kind_name(kind: LeafKind) -> &'static str {
    match kind {
        LeafKind::Str => "string",
        LeafKind::Int => "integer",
        LeafKind::Bool => "boolean",
    }
}

/// Parse the default literal declared on a leaf.
pub(super) fn parse_literal(literal: &str, kind: LeafKind) -> Result<Value, String> {
    coerce_env(literal, kind)
}

/// Parse a boolean from a string.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "on" => Some(true),
        "false" | "f" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
