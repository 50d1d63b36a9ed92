//! Scan and history sessions for MemoryStore
//!
//! A session snapshots the matched entries when it is opened and holds a
//! [`SessionGuard`] until it is closed or dropped. The guard keeps the
//! store's open-session count accurate, which is how leaked scans are
//! detected in tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ledgerkit_core::{HistoryEntry, HistorySession, Result, ScanEntry, ScanSession};

/// Registration of one open session; decrements the counter on drop
#[derive(Debug)]
pub struct SessionGuard {
    open: Arc<AtomicUsize>,
}

impl SessionGuard {
    pub(crate) fn acquire(open: &Arc<AtomicUsize>) -> Self {
        open.fetch_add(1, Ordering::SeqCst);
        Self { open: open.clone() }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Range-scan session over a snapshot of matching entries
#[derive(Debug)]
pub struct MemoryScan {
    entries: std::vec::IntoIter<ScanEntry>,
    guard: Option<SessionGuard>,
}

impl MemoryScan {
    pub(crate) fn new(entries: Vec<ScanEntry>, guard: SessionGuard) -> Self {
        Self {
            entries: entries.into_iter(),
            guard: Some(guard),
        }
    }
}

impl Iterator for MemoryScan {
    type Item = Result<ScanEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        self.guard.as_ref()?;
        self.entries.next().map(Ok)
    }
}

impl ScanSession for MemoryScan {
    fn close(&mut self) {
        if self.guard.take().is_some() {
            self.entries = Vec::new().into_iter();
        }
    }
}

impl Drop for MemoryScan {
    fn drop(&mut self) {
        self.close();
    }
}

/// History session over a snapshot of a key's modifications
#[derive(Debug)]
pub struct MemoryHistory {
    entries: std::vec::IntoIter<HistoryEntry>,
    guard: Option<SessionGuard>,
}

impl MemoryHistory {
    pub(crate) fn new(entries: Vec<HistoryEntry>, guard: SessionGuard) -> Self {
        Self {
            entries: entries.into_iter(),
            guard: Some(guard),
        }
    }
}

impl Iterator for MemoryHistory {
    type Item = Result<HistoryEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        self.guard.as_ref()?;
        self.entries.next().map(Ok)
    }
}

impl HistorySession for MemoryHistory {
    fn close(&mut self) {
        if self.guard.take().is_some() {
            self.entries = Vec::new().into_iter();
        }
    }
}

impl Drop for MemoryHistory {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_counts() {
        let open = Arc::new(AtomicUsize::new(0));
        let g1 = SessionGuard::acquire(&open);
        let g2 = SessionGuard::acquire(&open);
        assert_eq!(open.load(Ordering::SeqCst), 2);
        drop(g1);
        assert_eq!(open.load(Ordering::SeqCst), 1);
        drop(g2);
        assert_eq!(open.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_close_is_idempotent_and_stops_iteration() {
        let open = Arc::new(AtomicUsize::new(0));
        let entries = vec![(b"a".to_vec(), b"1".to_vec()), (b"b".to_vec(), b"2".to_vec())];
        let mut scan = MemoryScan::new(entries, SessionGuard::acquire(&open));

        assert!(scan.next().is_some());
        scan.close();
        scan.close();
        assert_eq!(open.load(Ordering::SeqCst), 0);
        assert!(scan.next().is_none());
    }

    #[test]
    fn test_drop_releases() {
        let open = Arc::new(AtomicUsize::new(0));
        {
            let _history = MemoryHistory::new(Vec::new(), SessionGuard::acquire(&open));
            assert_eq!(open.load(Ordering::SeqCst), 1);
        }
        assert_eq!(open.load(Ordering::SeqCst), 0);
    }
}
