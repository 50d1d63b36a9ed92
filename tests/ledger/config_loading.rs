//! Config Loading Tests
//!
//! `ledgerkit.toml` round trips and validation at startup.

use std::sync::Arc;

use crate::common::*;
use ledgerkit::CONFIG_FILE_NAME;
use tempfile::TempDir;

#[test]
fn executor_from_config_file() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        r#"
aggregate_identity = "coffeeauditMSP"

[[collections]]
identity = "bobscoffeeMSP"
collection = "BobsCoffeeCollection"
"#,
    )
    .unwrap();

    let config = LedgerConfig::from_file(&path).unwrap();
    let executor = Executor::from_config(Arc::new(MemoryStore::new()), &config).unwrap();

    assert!(call(&executor, &caller(BOB), "setPrivate", &["k", "v"]).is_ok());
    let resp = call(&executor, &caller(CHARLIE), "setPrivate", &["k", "v"]);
    assert_eq!(resp.reason.as_deref(), Some("unknown_identity"));
}

#[test]
fn default_file_has_no_collections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    LedgerConfig::write_default_if_missing(&path).unwrap();
    let config = LedgerConfig::from_file(&path).unwrap();
    assert!(config.routing.collections.is_empty());
    assert_eq!(config.routing.aggregate_identity, None);
}

#[test]
fn written_config_reloads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    coffee_config().write_to_file(&path).unwrap();
    let reloaded = LedgerConfig::from_file(&path).unwrap();
    assert_eq!(reloaded.routing.collections.len(), 3);
    assert_eq!(reloaded.routing.aggregate_identity.as_deref(), Some(AUDIT));
}

#[test]
fn inconsistent_routing_rejected() {
    let result = LedgerConfig::from_toml_str(
        r#"
aggregate_identity = "coffeeauditMSP"

[[collections]]
identity = "coffeeauditMSP"
collection = "AuditCollection"
"#,
    );
    assert_eq!(result.unwrap_err().reason_code(), "invalid_argument");
}
