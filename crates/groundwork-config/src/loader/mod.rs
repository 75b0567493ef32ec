//! Layered configuration resolution.
//!
//! Resolves one typed value from three sources under a fixed per-leaf
//! precedence (environment > file > declared default), then validates every
//! declared constraint before handing the value to the caller. The pipeline
//! for one call: read the file tree, overlay bound environment variables,
//! normalize leaf values to their declared kinds, apply defaults to leaves
//! still at their zero value, validate, and decode. A failure at any stage is
//! terminal; there is never a partially resolved result.

mod coerce;
mod defaults;
mod merge;
mod source;
mod validate;


use std::collections::HashMap;
use std::path::Path;

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ConfigError;
use crate::schema::Schema;

/// A resolved configuration value plus source metadata.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    /// The fully resolved, validated configuration. Exclusively owned by the
    /// caller; the engine keeps no reference.
    pub config: T,
    /// Whether the config file was present and parsed, independent of which
    /// values ended up used.
    pub file_found: bool,
}

/// Resolve `T` from the YAML file at `path`, the process environment, and
/// the schema's declared defaults.
///
/// A missing or unreadable file is not an error; resolution proceeds from the
/// environment and defaults with `file_found = false`. A file that exists but
/// does not parse, a value that cannot be coerced into its declared kind, and
/// any constraint violation are all fatal.
///
/// Target structs are expected to mark fields `#[serde(default)]` so leaves
/// absent from every source decode to the type's zero value.
pub fn load<T: DeserializeOwned>(
    path: impl AsRef<Path>,
    schema: &Schema,
) -> Result<Loaded<T>, ConfigError> {
    load_with_env(path, schema, &source::process_env())
}

/// Same as [`load`], resolving against an explicit environment snapshot
/// instead of the live process environment.
pub fn load_with_env<T: DeserializeOwned>(
    path: impl AsRef<Path>,
    schema: &Schema,
    env: &HashMap<String, String>,
) -> Result<Loaded<T>, ConfigError> {
    let path = path.as_ref();

    // Every leaf is bound to its environment name before any source is read.
    let bindings = schema.bindings();
    debug!(
        "resolving config (path={}, leaves={})",
        path.display(),
        bindings.len()
    );

    let file = source::read_file_tree(path)?;
    let mut tree = file.tree;

    // Environment overrides, highest precedence per leaf.
    for binding in &bindings {
        let Some(raw) = env.get(&binding.env_name) else {
            continue;
        };
        let value =
            coerce::coerce_env(raw, binding.kind).map_err(|message| ConfigError::UnmarshalFailed {
                path: binding.key_path.clone(),
                message,
            })?;
        debug!(
            "environment override (key={}, var={})",
            binding.key_path, binding.env_name
        );
        merge::insert_at_path(&mut tree, &binding.key_path, value);
    }

    // Normalize file-sourced values to their declared kinds.
    for binding in &bindings {
        let normalized = match merge::value_at_path(&tree, &binding.key_path) {
            None => None,
            Some(value) => coerce::normalize(value, binding.kind).map_err(|message| {
                ConfigError::UnmarshalFailed {
                    path: binding.key_path.clone(),
                    message,
                }
            })?,
        };
        if let Some(value) = normalized {
            merge::insert_at_path(&mut tree, &binding.key_path, value);
        }
    }

    defaults::apply_defaults(&mut tree, &bindings)?;

    let report = validate::evaluator().check_all(&tree, &bindings);
    if !report.is_empty() {
        warn!(
            "config validation failed (path={}, violations={})",
            path.display(),
            report.violations.len()
        );
        return Err(ConfigError::ValidationFailed(report));
    }

    let config: T = serde_json::from_value(Value::Object(tree))?;
    info!(
        "config resolved (path={}, file_found={})",
        path.display(),
        file.found
    );
    Ok(Loaded {
        config,
        file_found: file.found,
    })
}
