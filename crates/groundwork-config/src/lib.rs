//! Layered typed configuration for Groundwork services.
//!
//! Every service in the fleet boots by resolving one strongly-typed config
//! value from a YAML file, the process environment, and schema-declared
//! defaults, validating it before anything else starts. The engine is
//! generic over the target type: a declarative [`Schema`] describes the
//! type's shape, and [`load`] resolves, defaults, validates, and decodes in
//! one call.

mod error;
mod loader;
mod model;
mod schema;

/// Public error type returned by config resolution APIs.
pub use error::{ConfigError, ValidationReport, Violation};
/// Resolution entry points and the resolved-value wrapper.
pub use loader::{Loaded, load, load_with_env};
/// Shared fleet configuration models.
pub use model::{AppEnv, DatabaseConfig, GlobalConfig};
/// Declarative schema vocabulary.
pub use schema::{Constraint, Leaf, LeafBinding, LeafKind, Schema};
