//! Dispatch Tests
//!
//! Function-name parsing, argument validation and response shape.

use crate::common::*;
use ledgerkit::{Command, Error, STATUS_ERROR, STATUS_OK};

#[test]
fn success_response_shape() {
    let (_, executor) = create_executor();
    let resp = call(&executor, &public(), "set", &["a", "1"]);

    assert_eq!(resp.status, STATUS_OK);
    assert_eq!(resp.reason, None);
    assert_eq!(resp.payload_str(), "1");
}

#[test]
fn failure_response_carries_reason_and_message() {
    let (_, executor) = create_executor();
    let resp = call(&executor, &public(), "no_such_function", &[]);

    assert_eq!(resp.status, STATUS_ERROR);
    assert_eq!(resp.reason.as_deref(), Some("unknown_operation"));
    assert!(resp.message.contains("no_such_function"));
    assert!(resp.payload.is_empty());
}

#[test]
fn parse_rejects_bad_key_counts() {
    let args = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    let err = Command::parse("get_table_multi_key", &args(&["orders", "two", "alice"])).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));

    let err = Command::parse("get_table_multi_key", &args(&["orders", "-1"])).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));

    let err = Command::parse("set_table_multi_key", &args(&["orders", "2", "alice", "10"])).unwrap_err();
    assert!(matches!(err, Error::ArgumentCountMismatch { .. }));
}

#[test]
fn mismatch_message_names_operation() {
    let (_, executor) = create_executor();
    let resp = call(&executor, &public(), "get_table", &["orders"]);

    assert_eq!(resp.reason.as_deref(), Some("argument_count_mismatch"));
    assert!(resp.message.contains("get_table"));
}

#[test]
fn read_only_classification() {
    let args = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    assert!(Command::parse("get_table", &args(&["t", ""])).unwrap().is_read_only());
    assert!(Command::parse("getPrivate", &args(&["k"])).unwrap().is_read_only());
    assert!(!Command::parse("set_table", &args(&["t", "k", "v"])).unwrap().is_read_only());
}

#[test]
fn overflowing_key_count_is_rejected_before_store_access() {
    let (store, executor) = create_executor();
    let huge = usize::MAX.to_string();

    let resp = call(&executor, &public(), "set_table_multi_key", &["orders", huge.as_str()]);
    assert_eq!(resp.reason.as_deref(), Some("argument_count_mismatch"));

    let resp = call(&executor, &public(), "get_table_multi_key", &["orders", huge.as_str(), "alice"]);
    assert_eq!(resp.reason.as_deref(), Some("argument_count_mismatch"));

    let resp = call(&executor, &caller(BOB), "get_table_private_scan", &["lots", huge.as_str()]);
    assert_eq!(resp.reason.as_deref(), Some("argument_count_mismatch"));

    assert!(store.is_empty());
    assert_eq!(store.open_sessions(), 0);
    let history = call(&executor, &public(), "table_history_multi_key", &["orders", "1", "alice"]);
    assert_eq!(history.payload_str(), "[]");
}
