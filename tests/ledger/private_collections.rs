//! Private Collection Tests
//!
//! Identity routing, shared collections and the aggregate reader.

use crate::common::*;

// ============================================================================
// Routing
// ============================================================================

#[test]
fn identities_sharing_a_collection_see_each_other() {
    let (_, executor) = create_executor();

    call(&executor, &caller(BOB), "setPrivate", &["beans", "arabica"]);
    assert_eq!(
        call(&executor, &caller(DANA), "getPrivate", &["beans"]).payload_str(),
        "arabica"
    );
    assert_eq!(
        call(&executor, &caller(CHARLIE), "getPrivate", &["beans"]).reason.as_deref(),
        Some("not_found")
    );
}

#[test]
fn private_tables_stay_out_of_public_state() {
    let (store, executor) = create_executor();

    call(&executor, &caller(CHARLIE), "insert_or_modify", &["lots", "l1", "9"]);
    assert_eq!(store.len_in(&ledgerkit::Space::Public), 0);

    let resp = call(&executor, &public(), "get_table", &["lots", ""]);
    assert_eq!(resp.reason.as_deref(), Some("no_matching_rows"));
}

#[test]
fn aggregate_reader_cannot_write() {
    let (store, executor) = create_executor();
    let inv = caller(AUDIT).with_transient(
        TransientMap::new().with("keyvalue", r#"{"key":"k","value":"v"}"#),
    );

    let resp = call(&executor, &inv, "setPrivateTransient", &[]);
    assert_eq!(resp.reason.as_deref(), Some("write_not_permitted"));
    assert!(store.is_empty());
}

// ============================================================================
// Aggregate fan-out
// ============================================================================

#[test]
fn aggregate_scan_visits_each_collection_once() {
    let (store, executor) = create_executor();

    call(&executor, &caller(BOB), "insert_or_modify_multi_key", &["lots", "2", "farm1", "2024", "{\"kg\":50}"]);
    call(&executor, &caller(DANA), "insert_or_modify_multi_key", &["lots", "2", "farm2", "2024", "{\"kg\":70}"]);
    call(&executor, &caller(CHARLIE), "insert_or_modify_multi_key", &["lots", "2", "farm1", "2025", "{\"kg\":60}"]);

    let result = json(&call(&executor, &caller(AUDIT), "get_table_private_scan", &["lots", "1", "farm1"]));
    assert_eq!(
        result,
        serde_json::json!([
            {
                "collection": "BobsCoffeeCollection",
                "records": [{"Key": "farm1,2024", "Record": {"kg": 50}}],
            },
            {
                "collection": "CharliesCoffeeCollection",
                "records": [{"Key": "farm1,2025", "Record": {"kg": 60}}],
            },
        ])
    );
    assert_eq!(store.open_sessions(), 0);
}

#[test]
fn aggregate_scan_with_nothing_anywhere() {
    let (_, executor) = create_executor();

    let result = json(&call(&executor, &caller(AUDIT), "get_table_private_scan", &["lots", "0"]));
    assert_eq!(
        result,
        serde_json::json!([
            {"collection": "BobsCoffeeCollection", "records": []},
            {"collection": "CharliesCoffeeCollection", "records": []},
        ])
    );
}

#[test]
fn aggregate_row_read_is_tagged() {
    let (_, executor) = create_executor();
    call(&executor, &caller(CHARLIE), "insert_or_modify", &["lots", "l1", "9"]);

    let result = json(&call(&executor, &caller(AUDIT), "get_table_private", &["lots", "l1"]));
    assert_eq!(
        result,
        serde_json::json!([{"collection": "CharliesCoffeeCollection", "value": "9"}])
    );
}
