//! # ledgerkit Executor
//!
//! The public API for ledgerkit: composite-key indexed tables and private
//! data collections over an ordered ledger key-value store.
//!
//! It provides:
//! - [`Executor`] - parses and runs invocations against a [`Store`]
//! - [`Command`]/[`Output`] - the typed instruction set and its results
//! - [`Response`] - status, payload and reason code returned per invocation
//! - [`LedgerConfig`] - the collection routing table from `ledgerkit.toml`
//!
//! ## Quick Start
//!
//! ```text
//! use ledgerkit_executor::{Executor, Invocation, LedgerConfig};
//!
//! let config = LedgerConfig::from_file(Path::new("ledgerkit.toml"))?;
//! let executor = Executor::from_config(store, &config)?;
//!
//! let inv = Invocation::new(tx_id).as_caller("bobscoffeeMSP");
//! let resp = executor.invoke("get_table_multi_key", &args, &inv);
//! ```
//!
//! ## Operations
//!
//! | Function | Command | Space |
//! |----------|---------|-------|
//! | `set`, `store`, `get`, `delete`, `GetKeyHisLog` | KV | public |
//! | `set_table`, `set_table_multi_key`, `get_table`, `get_table_multi_key` | Table | public |
//! | `get_table_row[_multi_key]`, `delete_table[_multi_key]`, `table_history[_multi_key]` | Table | public |
//! | `setPrivate`, `getPrivate`, `deletePrivate`, `setTransient`, `setPrivateTransient` | KV | caller's collection |
//! | `createNewDocument`, `getHash` | KV | caller's collection |
//! | `insert_or_modify[_multi_key]`, `get_table_private`, `delete_table_private`, `get_table_private_scan` | Table | caller's collection |

#![warn(missing_docs)]

mod command;
mod config;
mod executor;
mod invocation;
mod output;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use command::Command;
pub use config::{LedgerConfig, CONFIG_FILE_NAME};
pub use executor::Executor;
pub use invocation::Invocation;
pub use output::{Output, Response, STATUS_ERROR, STATUS_OK};

// Re-export core types so users don't need ledgerkit-core directly
pub use ledgerkit_core::{
    CollectionName, Error, FixedIdentity, HistoryEntry, IdentitySource, Space, Store,
    TransientMap, TransientSource,
};

// Re-export routing and result types from ledgerkit-primitives
pub use ledgerkit_primitives::{
    CollectionRoute, CollectionRouter, PartitionedResult, RecordStyle, ResultSet, RouterConfig,
};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
