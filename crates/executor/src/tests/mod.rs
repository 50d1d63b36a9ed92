//! Test modules for the executor crate.


use std::sync::Arc;

use ledgerkit_storage::MemoryStore;

use crate::{CollectionRoute, Executor, Invocation, LedgerConfig, Response, RouterConfig};

pub const BOB: &str = "bobscoffeeMSP";
pub const CHARLIE: &str = "charliescoffeeMSP";
pub const AUDIT: &str = "coffeeauditMSP";

/// Routing table used by every executor test
pub fn coffee_config() -> LedgerConfig {
    LedgerConfig::new(RouterConfig {
        aggregate_identity: Some(AUDIT.to_string()),
        collections: vec![
            CollectionRoute::new(BOB, "BobsCoffeeCollection"),
            CollectionRoute::new(CHARLIE, "CharliesCoffeeCollection"),
        ],
    })
}

/// Create a test executor over a fresh in-memory store.
pub fn create_test_executor() -> (Arc<MemoryStore>, Executor) {
    let store = Arc::new(MemoryStore::new());
    let executor = Executor::from_config(store.clone(), &coffee_config()).unwrap();
    (store, executor)
}

/// Invoke `function` with string arguments.
pub fn call(executor: &Executor, inv: &Invocation, function: &str, args: &[&str]) -> Response {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    executor.invoke(function, &args, inv)
}
