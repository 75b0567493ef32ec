//! End-to-end resolution for a composed service configuration.
//!
//! Mirrors how a fleet service declares its config: the shared global and
//! database fragments flattened together with service-specific fields.

use std::collections::HashMap;
use std::fs;

use pretty_assertions::assert_eq;
use serde::Deserialize;
use tempfile::TempDir;

use groundwork_config::{
    load, load_with_env, AppEnv, ConfigError, Constraint, DatabaseConfig, GlobalConfig, Leaf,
    Loaded, Schema,
};

#[derive(Debug, Deserialize, Default, PartialEq)]
struct ContactsServiceConfig {
    #[serde(flatten)]
    global: GlobalConfig,
    #[serde(flatten)]
    database: DatabaseConfig,
    #[serde(default)]
    contacts: ContactsSettings,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
struct ContactsSettings {
    #[serde(default)]
    page_size: i64,
    #[serde(default)]
    admin_email: String,
}

fn contacts_schema() -> Schema {
    Schema::new()
        .fragment(GlobalConfig::schema())
        .fragment(DatabaseConfig::schema())
        .group(
            "contacts",
            Schema::new()
                .leaf(
                    Leaf::integer("page_size")
                        .default("25")
                        .constrain(Constraint::Gte(1))
                        .constrain(Constraint::Lte(100)),
                )
                .leaf(Leaf::string("admin_email").constrain(Constraint::Email)),
        )
}

fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn resolves_composed_service_config() {
    let temp = TempDir::new().expect("tmp");
    let path = temp.path().join("contacts.yaml");
    fs::write(
        &path,
        concat!(
            "service_name: contacts\n",
            "port: 8081\n",
            "contacts:\n",
            "  admin_email: ops@example.com\n",
        ),
    )
    .expect("write");

    let env = env_of(&[("DB_MAX_POOL", "50"), ("CONTACTS_PAGE_SIZE", "40")]);
    let loaded: Loaded<ContactsServiceConfig> =
        load_with_env(&path, &contacts_schema(), &env).expect("load");

    assert!(loaded.file_found);
    assert_eq!(loaded.config.global.service_name, "contacts");
    assert_eq!(loaded.config.global.port, 8081);
    assert_eq!(loaded.config.global.log_level, "info");
    assert_eq!(loaded.config.global.env, AppEnv::Dev);
    assert_eq!(loaded.config.database.max_pool, 50);
    assert_eq!(loaded.config.database.min_idle, 5);
    assert_eq!(loaded.config.contacts.page_size, 40);
    assert_eq!(loaded.config.contacts.admin_email, "ops@example.com");
}

#[test]
fn startup_fails_with_full_violation_report() {
    let temp = TempDir::new().expect("tmp");
    let path = temp.path().join("contacts.yaml");
    fs::write(
        &path,
        concat!(
            "database_url: \"\"\n",
            "db_max_pool: 500\n",
            "contacts:\n",
            "  admin_email: not-an-email\n",
        ),
    )
    .expect("write");

    let result: Result<Loaded<ContactsServiceConfig>, _> =
        load_with_env(&path, &contacts_schema(), &env_of(&[]));
    let ConfigError::ValidationFailed(report) = result.unwrap_err() else {
        panic!("expected validation failure");
    };
    let violated: Vec<&str> = report
        .violations
        .iter()
        .map(|v| v.key_path.as_str())
        .collect();
    assert_eq!(
        violated,
        vec!["db_max_pool", "contacts.admin_email"],
        "report: {report}"
    );
}

/// `load` resolves against the live process environment; keys here are
/// namespaced so ambient variables cannot collide.
#[test]
fn load_reads_process_environment() {
    #[derive(Debug, Deserialize, Default)]
    struct Smoke {
        #[serde(default)]
        groundwork_smoke_level: String,
    }
    let schema = Schema::new().leaf(Leaf::string("groundwork_smoke_level").default("quiet"));

    let temp = TempDir::new().expect("tmp");
    let loaded: Loaded<Smoke> = load(temp.path().join("absent.yaml"), &schema).expect("load");
    assert!(!loaded.file_found);
    assert_eq!(loaded.config.groundwork_smoke_level, "quiet");
}
