//! ledgerkit - Composite-key tables and private collections for ledger state
//!
//! ledgerkit layers indexed tables over an ordered key-value store. Rows are
//! addressed by a table name plus one or more key parts and can be scanned
//! by any leading run of those parts. Private collections hold data visible
//! only to the identities routed to them.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use ledgerkit::{CollectionRoute, Executor, Invocation, LedgerConfig, MemoryStore, RouterConfig};
//!
//! let config = LedgerConfig::new(RouterConfig {
//!     aggregate_identity: None,
//!     collections: vec![CollectionRoute::new("bobscoffeeMSP", "BobsCoffeeCollection")],
//! });
//! let executor = Executor::from_config(Arc::new(MemoryStore::new()), &config).unwrap();
//!
//! let args: Vec<String> = ["cars", "car1", "red"].iter().map(|s| s.to_string()).collect();
//! let resp = executor.invoke("set_table", &args, &Invocation::new("tx1"));
//! assert!(resp.is_ok());
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`], which parses an invocation
//! into a [`Command`] and returns a [`Response`]. Storage is pluggable via
//! the [`Store`] trait; [`MemoryStore`] is the bundled implementation.

// Re-export the public API from ledgerkit-executor
pub use ledgerkit_executor::*;

pub use ledgerkit_storage::MemoryStore;
