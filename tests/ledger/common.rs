//! Shared helpers for the ledger test suite.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use tracing_subscriber::filter::LevelFilter;

pub use ledgerkit::{
    CollectionRoute, Executor, Invocation, LedgerConfig, MemoryStore, Response, RouterConfig,
    TransientMap,
};

pub const BOB: &str = "bobscoffeeMSP";
pub const CHARLIE: &str = "charliescoffeeMSP";
pub const DANA: &str = "danascoffeeMSP";
pub const AUDIT: &str = "coffeeauditMSP";

static INIT_TRACING: Once = Once::new();

/// Route executor logs to the test harness so failures show what happened.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(LevelFilter::DEBUG)
            .try_init();
    });
}

/// Bob and Dana share one collection; Charlie owns a separate one.
pub fn coffee_config() -> LedgerConfig {
    LedgerConfig::new(RouterConfig {
        aggregate_identity: Some(AUDIT.to_string()),
        collections: vec![
            CollectionRoute::new(BOB, "BobsCoffeeCollection"),
            CollectionRoute::new(CHARLIE, "CharliesCoffeeCollection"),
            CollectionRoute::new(DANA, "BobsCoffeeCollection"),
        ],
    })
}

/// Executor over a fresh in-memory store.
pub fn create_executor() -> (Arc<MemoryStore>, Executor) {
    init_tracing();
    let store = Arc::new(MemoryStore::new());
    let executor = Executor::from_config(store.clone(), &coffee_config()).unwrap();
    (store, executor)
}

pub fn public() -> Invocation {
    Invocation::new("tx-public")
}

pub fn caller(identity: &str) -> Invocation {
    Invocation::new(format!("tx-{}", identity)).as_caller(identity)
}

/// Invoke `function` with string arguments.
pub fn call(executor: &Executor, inv: &Invocation, function: &str, args: &[&str]) -> Response {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    executor.invoke(function, &args, inv)
}

/// Parse a JSON payload, panicking with the message on failure.
pub fn json(resp: &Response) -> serde_json::Value {
    assert!(resp.is_ok(), "invocation failed: {}", resp.message);
    serde_json::from_slice(&resp.payload).unwrap()
}
