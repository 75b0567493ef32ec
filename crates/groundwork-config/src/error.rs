//! Error types for config resolution and validation.

use std::fmt;

use thiserror::Error;

/// Errors returned while resolving or validating config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Parsing the config file failed.
    #[error("failed to parse config: {0}")]
    ParseFailed(#[from] serde_yaml::Error),
    /// The config file parsed but is not a mapping at the root.
    #[error("invalid config document: {0}")]
    InvalidDocument(String),
    /// A sourced value could not be coerced into its declared leaf kind.
    #[error("failed to unmarshal {path}: {message}")]
    UnmarshalFailed { path: String, message: String },
    /// Decoding the resolved tree into the target type failed.
    #[error("failed to decode config: {0}")]
    DecodeFailed(#[from] serde_json::Error),
    /// One or more declared constraints failed.
    #[error("validation failed: {0}")]
    ValidationFailed(ValidationReport),
}

/// A single failed constraint on a single leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted key path of the offending leaf.
    pub key_path: String,
    /// Rendered constraint spec, e.g. `required` or `gte=1`.
    pub constraint: String,
    /// Human-readable description of the failure.
    pub message: String,
}

/// Every constraint violation found across the whole schema.
///
/// Violations are collected rather than short-circuited so operators can fix
/// every misconfigured field in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Violations in schema declaration order.
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Whether any constraint failed.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.violations {
            if !first {
                write!(f, "; ")?;
            }
            write!(
                f,
                "{}: {} ({})",
                violation.key_path, violation.constraint, violation.message
            )?;
            first = false;
        }
        Ok(())
    }
}
