//! Source readers: the YAML config file and the process environment.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;
use serde_json::{Map, Value};

use crate::error::ConfigError;

/// The parsed file tree plus whether the file was actually found.
pub(super) struct FileSource {
    pub(super) tree: Map<String, Value>,
    pub(super) found: bool,
}

/// Read and parse the config file into a key/value tree.
///
/// A missing or unreadable file yields an empty tree with `found = false`;
/// only a file that exists but is malformed is fatal.
pub(super) fn read_file_tree(path: &Path) -> Result<FileSource, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            debug!(
                "config file unavailable (path={}, err={})",
                path.display(),
                err
            );
            return Ok(FileSource {
                tree: Map::new(),
                found: false,
            });
        }
    };

    let value: Value = serde_yaml::from_str(&contents)?;
    let tree = match value {
        // An empty document is a valid, empty tree.
        Value::Null => Map::new(),
        Value::Object(map) => map,
        other => {
            return Err(ConfigError::InvalidDocument(format!(
                "expected a mapping at the document root, got {}",
                value_kind(&other)
            )));
        }
    };
    debug!("config file loaded (path={})", path.display());
    Ok(FileSource { tree, found: true })
}

/// Snapshot the live process environment as a flat mapping.
pub(super) fn process_env() -> HashMap<String, String> {
    std::env::vars().collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
