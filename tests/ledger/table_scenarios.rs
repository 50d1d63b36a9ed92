//! Table Scenario Tests
//!
//! Composite-key tables in public state, driven through `invoke`.

use crate::common::*;
use ledgerkit::{Command, Output};

fn seed_orders(executor: &Executor) {
    let inv = public();
    for (who, year, amount) in [
        ("alice", "2024", "10"),
        ("alice", "2025", "15"),
        ("bob", "2024", "20"),
        ("alicia", "2024", "5"),
    ] {
        assert!(call(executor, &inv, "set_table_multi_key", &["orders", "2", who, year, amount]).is_ok());
    }
}

// ============================================================================
// Prefix scans
// ============================================================================

#[test]
fn leading_part_selects_exact_matches_only() {
    let (store, executor) = create_executor();
    seed_orders(&executor);

    // "alicia" shares a textual prefix with "alice" but is a different part
    let rows = json(&call(&executor, &public(), "get_table_multi_key", &["orders", "1", "alice"]));
    assert_eq!(
        rows,
        serde_json::json!([
            {"key": "alice,2024", "value": "10"},
            {"key": "alice,2025", "value": "15"},
        ])
    );
    assert_eq!(store.open_sessions(), 0);
}

#[test]
fn full_key_scan_returns_one_row() {
    let (_, executor) = create_executor();
    seed_orders(&executor);

    let rows = json(&call(&executor, &public(), "get_table_multi_key", &["orders", "2", "bob", "2024"]));
    assert_eq!(rows, serde_json::json!([{"key": "bob,2024", "value": "20"}]));
}

#[test]
fn whole_table_scan_is_ordered() {
    let (_, executor) = create_executor();
    seed_orders(&executor);

    let rows = json(&call(&executor, &public(), "get_table_multi_key", &["orders", "0"]));
    let keys: Vec<_> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["key"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(keys, vec!["alice,2024", "alice,2025", "alicia,2024", "bob,2024"]);
}

#[test]
fn tables_do_not_bleed_into_each_other() {
    let (_, executor) = create_executor();
    let inv = public();
    call(&executor, &inv, "set_table", &["order", "x", "1"]);
    call(&executor, &inv, "set_table", &["orders", "y", "2"]);

    let rows = json(&call(&executor, &inv, "get_table", &["order", ""]));
    assert_eq!(rows, serde_json::json!([{"key": "x", "value": "1"}]));
}

#[test]
fn plain_keys_and_tables_coexist() {
    let (_, executor) = create_executor();
    let inv = public();
    call(&executor, &inv, "set", &["cars", "plain"]);
    call(&executor, &inv, "set_table", &["cars", "car1", "red"]);

    assert_eq!(call(&executor, &inv, "get", &["cars"]).payload_str(), "plain");
    let rows = json(&call(&executor, &inv, "get_table", &["cars", ""]));
    assert_eq!(rows.as_array().unwrap().len(), 1);
}

// ============================================================================
// Row operations
// ============================================================================

#[test]
fn missing_row_is_not_found() {
    let (_, executor) = create_executor();
    seed_orders(&executor);

    let resp = call(&executor, &public(), "get_table_row", &["orders", "bob"]);
    assert_eq!(resp.reason.as_deref(), Some("not_found"));
}

#[test]
fn delete_then_scan() {
    let (_, executor) = create_executor();
    seed_orders(&executor);
    let inv = public();

    let resp = call(&executor, &inv, "delete_table_multi_key", &["orders", "2", "alice", "2024"]);
    assert_eq!(resp.payload_str(), "2024");

    let rows = json(&call(&executor, &inv, "get_table_multi_key", &["orders", "1", "alice"]));
    assert_eq!(rows, serde_json::json!([{"key": "alice,2025", "value": "15"}]));
}

#[test]
fn row_history_through_execute() {
    let (_, executor) = create_executor();
    let inv = public();
    call(&executor, &inv, "set_table_multi_key", &["orders", "2", "bob", "2024", "20"]);
    call(&executor, &inv, "set_table_multi_key", &["orders", "2", "bob", "2024", "25"]);

    let output = executor
        .execute(
            Command::TableHistory {
                table: "orders".into(),
                parts: vec!["bob".into(), "2024".into()],
            },
            &inv,
        )
        .unwrap();
    match output {
        Output::History(entries) => {
            assert_eq!(entries.len(), 2);
            assert!(entries[0].version < entries[1].version);
            assert!(!entries[1].is_delete);
        }
        _ => panic!("Expected History output"),
    }
}

// ============================================================================
// Failure handling
// ============================================================================

#[test]
fn scan_failure_releases_session() {
    let (store, executor) = create_executor();
    seed_orders(&executor);

    store.fail_scans_after(Some(2));
    let resp = call(&executor, &public(), "get_table_multi_key", &["orders", "0"]);
    assert_eq!(resp.reason.as_deref(), Some("scan_failed"));
    assert_eq!(store.open_sessions(), 0);

    store.fail_scans_after(None);
    assert!(call(&executor, &public(), "get_table_multi_key", &["orders", "0"]).is_ok());
}

#[test]
fn many_scans_leave_no_open_sessions() {
    let (store, executor) = create_executor();
    seed_orders(&executor);

    for _ in 0..50 {
        call(&executor, &public(), "get_table_multi_key", &["orders", "1", "alice"]);
        call(&executor, &public(), "get_table_multi_key", &["orders", "1", "nobody"]);
    }
    assert_eq!(store.open_sessions(), 0);
}
