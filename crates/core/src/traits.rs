//! Collaborator traits
//!
//! The ordered key-value store, the transient side channel and identity
//! resolution all live outside this workspace. These traits are the seams
//! the table layer talks through, so any backend can be swapped in without
//! touching upper layers.

use std::collections::HashMap;

use crate::error::Result;
use crate::history::HistoryEntry;
use crate::types::Space;

/// One `(key, value)` pair returned by a range scan
pub type ScanEntry = (Vec<u8>, Vec<u8>);

/// An open range-scan session
///
/// Forward-only and not restartable. The session holds store resources until
/// [`close`](ScanSession::close) is called or it is dropped; implementations
/// must make `close` idempotent and call it from `Drop`.
pub trait ScanSession: Iterator<Item = Result<ScanEntry>> + Send {
    /// Release the session
    fn close(&mut self);
}

/// An open key-history session
///
/// Yields entries oldest first. Same release contract as [`ScanSession`].
pub trait HistorySession: Iterator<Item = Result<HistoryEntry>> + Send {
    /// Release the session
    fn close(&mut self);
}

/// Ordered key-value store abstraction
///
/// Every invocation is assumed to run against a consistent snapshot as a
/// single all-or-nothing unit; isolation between concurrent invocations is
/// the implementation's responsibility.
///
/// Thread safety: all methods must be safe to call concurrently (Send + Sync).
pub trait Store: Send + Sync {
    /// Read the value at `key`, `None` if absent
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the store cannot be read.
    fn get(&self, space: &Space, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Create or replace the value at `key`
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the write cannot be applied.
    fn put(&self, space: &Space, key: &[u8], value: Vec<u8>) -> Result<()>;

    /// Remove `key`; removing an absent key is not an error
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the delete cannot be applied.
    fn delete(&self, space: &Space, key: &[u8]) -> Result<()>;

    /// Open a scan over every entry whose key starts with `prefix`
    ///
    /// Entries are yielded in ascending key order.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the session cannot be opened.
    fn scan_prefix(&self, space: &Space, prefix: &[u8]) -> Result<Box<dyn ScanSession>>;

    /// Open the modification history of a public key, oldest first
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the session cannot be opened.
    fn history(&self, key: &[u8]) -> Result<Box<dyn HistorySession>>;
}

/// Source of transient inputs passed alongside an invocation
///
/// Transient payloads are never persisted to the public log.
pub trait TransientSource {
    /// Read the transient entry `name`, `None` if absent
    fn transient(&self, name: &str) -> Result<Option<Vec<u8>>>;
}

/// Resolves the identity of the caller of an invocation
pub trait IdentitySource {
    /// Opaque identity string (e.g. a membership service id)
    fn caller_identity(&self) -> Result<String>;
}

/// Transient inputs held in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransientMap {
    entries: HashMap<String, Vec<u8>>,
}

impl TransientMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, replacing any previous value
    pub fn insert(&mut self, name: impl Into<String>, payload: impl Into<Vec<u8>>) {
        self.entries.insert(name.into(), payload.into());
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, name: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        self.insert(name, payload);
        self
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are present
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TransientSource for TransientMap {
    fn transient(&self, name: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(name).cloned())
    }
}

/// Identity fixed at construction time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedIdentity(pub String);

impl IdentitySource for FixedIdentity {
    fn caller_identity(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}
