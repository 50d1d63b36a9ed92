//! KvStore: plain single-string keys
//!
//! ## Design
//!
//! KvStore is a stateless facade over a [`Store`], like
//! [`TableStore`](crate::table::TableStore), for the passthrough operations
//! that address one key directly.
//!
//! Plain keys are validated before any store access: they must be non-empty
//! and must not begin with the composite-key namespace byte, so they can never
//! alias a table row or show up inside a table scan.

use std::sync::Arc;

use ledgerkit_core::key::validate_plain_key;
use ledgerkit_core::{Error, Result, Space, Store};
use tracing::debug;

use crate::scan::KeyHistory;

/// Plain key-value primitive
#[derive(Clone)]
pub struct KvStore {
    store: Arc<dyn Store>,
}

impl KvStore {
    /// Create new KvStore instance
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Create or replace the value at `key`
    pub fn set(&self, space: &Space, key: &str, value: Vec<u8>) -> Result<()> {
        validate_plain_key(key)?;
        self.store.put(space, key.as_bytes(), value)?;
        debug!(target: "ledgerkit::table", %space, key, "set");
        Ok(())
    }

    /// Read the value at `key`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when absent.
    pub fn get(&self, space: &Space, key: &str) -> Result<Vec<u8>> {
        self.get_opt(space, key)?
            .ok_or_else(|| Error::not_found(key))
    }

    /// Read the value at `key`, `None` when absent
    pub fn get_opt(&self, space: &Space, key: &str) -> Result<Option<Vec<u8>>> {
        validate_plain_key(key)?;
        self.store.get(space, key.as_bytes())
    }

    /// Remove `key`; absent keys are not an error
    pub fn delete(&self, space: &Space, key: &str) -> Result<()> {
        validate_plain_key(key)?;
        self.store.delete(space, key.as_bytes())?;
        debug!(target: "ledgerkit::table", %space, key, "delete");
        Ok(())
    }

    /// Every historical value of a public key, oldest first
    pub fn history(&self, key: &str) -> Result<KeyHistory> {
        validate_plain_key(key)?;
        Ok(KeyHistory::new(self.store.history(key.as_bytes())?))
    }
}

impl std::fmt::Debug for KvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvStore").finish_non_exhaustive()
    }
}
