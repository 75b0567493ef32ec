//! Default application for leaves still holding their zero value.
//!
//! Strictly lower precedence than both other sources: a default is written
//! only when the leaf is absent or holds its kind's zero value after the
//! merge. A legitimate value that coincides with the zero value is therefore
//! indistinguishable from "not set" and picks up the default; that is
//! documented behavior, not a defect.

use log::debug;
use serde_json::{Map, Value};

use super::{coerce, merge};
use crate::error::ConfigError;
use crate::schema::LeafBinding;

/// Write each declared default into the tree where no explicit value exists.
pub(super) fn apply_defaults(
    tree: &mut Map<String, Value>,
    bindings: &[LeafBinding],
) -> Result<(), ConfigError> {
    for binding in bindings {
        let Some(literal) = &binding.default else {
            continue;
        };
        let unset = match merge::value_at_path(tree, &binding.key_path) {
            None => true,
            Some(value) => is_zero(value),
        };
        if !unset {
            continue;
        }
        let value = coerce::parse_literal(literal, binding.kind).map_err(|message| {
            ConfigError::UnmarshalFailed {
                path: binding.key_path.clone(),
                message: format!("invalid default literal {literal:?}: {message}"),
            }
        })?;
        debug!("applying default (key={})", binding.key_path);
        merge::insert_at_path(tree, &binding.key_path, value);
    }
    Ok(())
}

/// Whether a tree value is the zero value of its scalar kind.
fn is_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Bool(b) => !b,
        Value::Number(n) => matches!(n.as_f64(), Some(f) if f == 0.0),
        _ => false,
    }
}
