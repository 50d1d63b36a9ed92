//! PrivateData: collection-scoped operations routed by caller identity
//!
//! Every write lands in the single collection the caller owns. Reads by a
//! concrete identity see only that collection; reads by the aggregate
//! identity fan out over all collections and come back tagged per
//! collection as a [`PrivateRead::Partitioned`].

use std::sync::Arc;

use ledgerkit_core::{CollectionName, Error, Result, Space, Store};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::aggregate::{KeyRendering, PartitionedResult, ResultSet};
use crate::kv::KvStore;
use crate::router::{CollectionRouter, Route};
use crate::table::TableStore;

/// Result of a private read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivateRead<T> {
    /// Read from the caller's own collection
    Own(T),
    /// Aggregate read, one entry per collection in configured order
    Partitioned(Vec<(CollectionName, T)>),
}

impl<T> PrivateRead<T> {
    /// The single-collection value, if this was not a fan-out
    pub fn into_own(self) -> Option<T> {
        match self {
            PrivateRead::Own(v) => Some(v),
            PrivateRead::Partitioned(_) => None,
        }
    }
}

/// Private-data facade
#[derive(Debug, Clone)]
pub struct PrivateData {
    tables: TableStore,
    kv: KvStore,
    router: Arc<CollectionRouter>,
}

impl PrivateData {
    /// Create a facade over `store` routed by `router`
    pub fn new(store: Arc<dyn Store>, router: Arc<CollectionRouter>) -> Self {
        Self {
            tables: TableStore::new(store.clone()),
            kv: KvStore::new(store),
            router,
        }
    }

    /// Get the router
    pub fn router(&self) -> &CollectionRouter {
        &self.router
    }

    // ========================================================================
    // Plain keys
    // ========================================================================

    /// Write `key` into the caller's collection
    pub fn set(&self, identity: &str, key: &str, value: Vec<u8>) -> Result<()> {
        let space = self.router.writable_space(identity)?;
        self.kv.set(&space, key, value)
    }

    /// Read `key`
    ///
    /// An aggregate read returns only the collections holding the key.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no readable collection holds the key.
    pub fn get(&self, identity: &str, key: &str) -> Result<PrivateRead<Vec<u8>>> {
        self.read_single(identity, key, |space| self.kv.get_opt(space, key))
    }

    /// Remove `key` from the caller's collection
    pub fn delete(&self, identity: &str, key: &str) -> Result<()> {
        let space = self.router.writable_space(identity)?;
        self.kv.delete(&space, key)
    }

    /// Store a new document under `document_id`
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` when the caller's collection already holds the id.
    pub fn create_document(
        &self,
        identity: &str,
        document_id: &str,
        content: Vec<u8>,
    ) -> Result<()> {
        let space = self.router.writable_space(identity)?;
        if self.kv.get_opt(&space, document_id)?.is_some() {
            return Err(Error::AlreadyExists {
                key: document_id.to_string(),
            });
        }
        self.kv.set(&space, document_id, content)?;
        debug!(target: "ledgerkit::router", identity, document_id, "document created");
        Ok(())
    }

    /// Hex-encoded SHA-256 digest of the private value at `key`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no readable collection holds the key.
    pub fn hash(&self, identity: &str, key: &str) -> Result<PrivateRead<String>> {
        self.read_single(identity, key, |space| {
            Ok(self.kv.get_opt(space, key)?.map(|v| sha256_hex(&v)))
        })
    }

    // ========================================================================
    // Tables
    // ========================================================================

    /// Create or replace a row in the caller's collection
    pub fn put_row<S: AsRef<str>>(
        &self,
        identity: &str,
        table: &str,
        parts: &[S],
        value: Vec<u8>,
    ) -> Result<()> {
        let space = self.router.writable_space(identity)?;
        self.tables.put(&space, table, parts, value)
    }

    /// Read one row
    pub fn get_row<S: AsRef<str>>(
        &self,
        identity: &str,
        table: &str,
        parts: &[S],
    ) -> Result<PrivateRead<Vec<u8>>> {
        let label = parts
            .iter()
            .map(|p| p.as_ref())
            .collect::<Vec<_>>()
            .join(",");
        self.read_single(identity, &format!("{}[{}]", table, label), |space| {
            match self.tables.get(space, table, parts) {
                Ok(v) => Ok(Some(v)),
                Err(Error::NotFound { .. }) => Ok(None),
                Err(e) => Err(e),
            }
        })
    }

    /// Remove a row from the caller's collection
    pub fn delete_row<S: AsRef<str>>(
        &self,
        identity: &str,
        table: &str,
        parts: &[S],
    ) -> Result<()> {
        let space = self.router.writable_space(identity)?;
        self.tables.delete(&space, table, parts)
    }

    /// Scan rows under `leading`
    ///
    /// A concrete caller with no matching rows gets `NoMatchingRows`. An
    /// aggregate caller always gets one (possibly empty) set per collection.
    pub fn scan<S: AsRef<str>>(
        &self,
        identity: &str,
        table: &str,
        leading: &[S],
        rendering: KeyRendering,
    ) -> Result<PrivateScan> {
        match self.router.resolve(identity)? {
            Route::Own(c) => {
                let space = Space::Collection(c);
                let set = self.tables.query(&space, table, leading, rendering)?;
                if set.is_empty() {
                    return Err(Error::NoMatchingRows {
                        table: table.to_string(),
                        prefix: leading
                            .iter()
                            .map(|p| p.as_ref())
                            .collect::<Vec<_>>()
                            .join(","),
                    });
                }
                Ok(PrivateRead::Own(set))
            }
            Route::Aggregate => {
                let partitions = self.router.fan_out(identity, |space| {
                    self.tables.query(space, table, leading, rendering)
                })?;
                Ok(PrivateRead::Partitioned(partitions))
            }
        }
    }

    fn read_single<T, F>(&self, identity: &str, label: &str, mut read: F) -> Result<PrivateRead<T>>
    where
        F: FnMut(&Space) -> Result<Option<T>>,
    {
        let aggregate = matches!(self.router.resolve(identity)?, Route::Aggregate);
        let found: Vec<(CollectionName, T)> = self
            .router
            .fan_out(identity, &mut read)?
            .into_iter()
            .filter_map(|(c, v)| v.map(|v| (c, v)))
            .collect();

        if found.is_empty() {
            return Err(Error::not_found(label));
        }
        if aggregate {
            return Ok(PrivateRead::Partitioned(found));
        }
        found
            .into_iter()
            .next()
            .map(|(_, v)| PrivateRead::Own(v))
            .ok_or_else(|| Error::not_found(label))
    }
}

/// Private scan result
pub type PrivateScan = PrivateRead<ResultSet>;

impl PrivateScan {
    /// Convert an aggregate scan into a [`PartitionedResult`]
    pub fn into_partitioned(self) -> Option<PartitionedResult> {
        match self {
            PrivateRead::Own(_) => None,
            PrivateRead::Partitioned(p) => Some(PartitionedResult::new(p)),
        }
    }
}

/// Lowercase hex SHA-256 of `bytes`
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
