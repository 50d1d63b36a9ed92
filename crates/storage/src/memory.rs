//! MemoryStore: in-process ordered key-value store
//!
//! This module implements the `Store` trait using:
//! - `BTreeMap<(Space, Vec<u8>), StoredValue>` so each space is a contiguous,
//!   byte-ordered range
//! - `parking_lot::RwLock` for thread-safe access
//! - `AtomicU64` for monotonically increasing write versions
//! - a per-key history log for keys in public state
//!
//! # Design Notes
//!
//! - **Snapshot scans**: a scan copies the matched range under the read lock
//!   and iterates the copy, so later writes never show up in an open session.
//! - **Session accounting**: every open scan or history session is counted;
//!   [`MemoryStore::open_sessions`] must be back to zero once a caller has
//!   finished, whatever the outcome.
//! - **Fault injection**: [`MemoryStore::fail_scans_after`] makes scans yield an
//!   error after a number of entries, for exercising iteration failures.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

use ledgerkit_core::{
    Error, HistoryEntry, HistorySession, Result, ScanEntry, ScanSession, Space, Store,
};

use crate::session::{MemoryHistory, MemoryScan, SessionGuard};
use crate::stored_value::StoredValue;

type DataMap = BTreeMap<(Space, Vec<u8>), StoredValue>;

/// In-memory ordered store
///
/// Thread-safe through `parking_lot::RwLock` and atomics. Cloning is not
/// supported; share it behind an `Arc<dyn Store>`.
#[derive(Debug)]
pub struct MemoryStore {
    /// Current value of every live key, per space
    data: Arc<RwLock<DataMap>>,
    /// Modification log of public keys, oldest first
    history: Arc<RwLock<BTreeMap<Vec<u8>, Vec<HistoryEntry>>>>,
    /// Global version counter
    version: AtomicU64,
    /// Number of scan/history sessions not yet released
    open_sessions: Arc<AtomicUsize>,
    /// When set, scans fail after yielding this many entries
    scan_fault: RwLock<Option<usize>>,
}

impl MemoryStore {
    /// Create a new empty store
    ///
    /// Initial version is 0 (no writes have occurred).
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(BTreeMap::new())),
            history: Arc::new(RwLock::new(BTreeMap::new())),
            version: AtomicU64::new(0),
            open_sessions: Arc::new(AtomicUsize::new(0)),
            scan_fault: RwLock::new(None),
        }
    }

    /// Get the version of the latest write
    pub fn current_version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Number of sessions opened and not yet closed or dropped
    pub fn open_sessions(&self) -> usize {
        self.open_sessions.load(Ordering::SeqCst)
    }

    /// Total number of live keys across all spaces
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// True when no keys are stored
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Number of live keys in one space
    pub fn len_in(&self, space: &Space) -> usize {
        self.data.read().keys().filter(|(s, _)| s == space).count()
    }

    /// Make subsequent scans fail after `entries` entries (`None` clears it)
    pub fn fail_scans_after(&self, entries: Option<usize>) {
        *self.scan_fault.write() = entries;
    }

    fn next_version(&self) -> u64 {
        self.version.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Append to the history log. Called with the data write lock held.
    fn record_history(&self, space: &Space, key: &[u8], entry: HistoryEntry) {
        if space.is_public() {
            self.history
                .write()
                .entry(key.to_vec())
                .or_default()
                .push(entry);
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn get(&self, space: &Space, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let data = self.data.read();
        Ok(data
            .get(&(space.clone(), key.to_vec()))
            .map(|sv| sv.value().to_vec()))
    }

    fn put(&self, space: &Space, key: &[u8], value: Vec<u8>) -> Result<()> {
        let mut data = self.data.write();
        let version = self.next_version();
        let entry = HistoryEntry::write(version, Utc::now(), value.clone());
        data.insert((space.clone(), key.to_vec()), StoredValue::new(value, version));
        self.record_history(space, key, entry);
        drop(data);

        debug!(target: "ledgerkit::store", %space, version, key_len = key.len(), "put");
        Ok(())
    }

    fn delete(&self, space: &Space, key: &[u8]) -> Result<()> {
        let mut data = self.data.write();
        if let Some(removed) = data.remove(&(space.clone(), key.to_vec())) {
            let version = self.next_version();
            self.record_history(space, key, HistoryEntry::delete(version, Utc::now()));
            drop(data);
            debug!(
                target: "ledgerkit::store",
                %space,
                version,
                removed_version = removed.version(),
                key_len = key.len(),
                "delete"
            );
        }
        Ok(())
    }

    fn scan_prefix(&self, space: &Space, prefix: &[u8]) -> Result<Box<dyn ScanSession>> {
        let start = (space.clone(), prefix.to_vec());
        let entries: Vec<ScanEntry> = {
            let data = self.data.read();
            data.range((Bound::Included(start), Bound::Unbounded))
                .take_while(|((s, k), _)| s == space && k.starts_with(prefix))
                .map(|((_, k), sv)| (k.clone(), sv.value().to_vec()))
                .collect()
        };

        debug!(target: "ledgerkit::store", %space, matched = entries.len(), "scan opened");

        let guard = SessionGuard::acquire(&self.open_sessions);
        match *self.scan_fault.read() {
            Some(limit) => Ok(Box::new(FaultyScan {
                inner: MemoryScan::new(entries, guard),
                remaining: limit,
                failed: false,
            })),
            None => Ok(Box::new(MemoryScan::new(entries, guard))),
        }
    }

    fn history(&self, key: &[u8]) -> Result<Box<dyn HistorySession>> {
        let entries = self.history.read().get(key).cloned().unwrap_or_default();
        let guard = SessionGuard::acquire(&self.open_sessions);
        Ok(Box::new(MemoryHistory::new(entries, guard)))
    }
}

/// Scan that reports a store failure after a fixed number of entries
#[derive(Debug)]
struct FaultyScan {
    inner: MemoryScan,
    remaining: usize,
    failed: bool,
}

impl Iterator for FaultyScan {
    type Item = Result<ScanEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if self.remaining == 0 {
            self.failed = true;
            return Some(Err(Error::store_unavailable("injected scan fault")));
        }
        self.remaining -= 1;
        self.inner.next()
    }
}

impl ScanSession for FaultyScan {
    fn close(&mut self) {
        self.inner.close();
    }
}
