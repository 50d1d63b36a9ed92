//! Prefix range reader
//!
//! Wraps a store scan session and decodes each row back into its composite
//! key. The session is owned by the reader and released on every exit path:
//! exhaustion, early drop, or the first error.
//!
//! ## Error semantics
//!
//! - A store error mid-iteration is reported once as `ScanFailed`
//! - A row whose key does not decode is reported once as `MalformedKey`
//! - After either, the reader is fused and yields `None`

use ledgerkit_core::key;
use ledgerkit_core::{
    CompositeKey, Error, HistoryEntry, HistorySession, Result, ScanSession, Space, Store,
};
use tracing::trace;

/// One decoded table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRow {
    /// Decoded composite key
    pub key: CompositeKey,
    /// Raw stored value
    pub value: Vec<u8>,
}

/// Lazy sequence of rows under a partial composite key
pub struct RangeScan {
    session: Box<dyn ScanSession>,
    done: bool,
}

impl RangeScan {
    /// Take ownership of an open store session
    pub fn new(session: Box<dyn ScanSession>) -> Self {
        Self {
            session,
            done: false,
        }
    }

    /// Release the underlying session; further calls to `next` yield `None`
    pub fn close(&mut self) {
        self.done = true;
        self.session.close();
    }

    fn fail(&mut self, err: Error) -> Option<Result<ScanRow>> {
        self.close();
        Some(Err(err))
    }
}

impl Iterator for RangeScan {
    type Item = Result<ScanRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.session.next() {
            None => {
                self.close();
                None
            }
            Some(Err(e)) => self.fail(Error::ScanFailed {
                reason: e.to_string(),
            }),
            Some(Ok((raw, value))) => match key::decode(&raw) {
                Ok(key) => {
                    trace!(target: "ledgerkit::table", %key, "row");
                    Some(Ok(ScanRow { key, value }))
                }
                Err(e) => self.fail(e),
            },
        }
    }
}

impl Drop for RangeScan {
    fn drop(&mut self) {
        self.session.close();
    }
}

impl std::fmt::Debug for RangeScan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeScan").field("done", &self.done).finish()
    }
}

/// Open a scan over every row of `table` whose key starts with `leading`
///
/// An empty `leading` selects the whole table.
///
/// # Errors
///
/// Returns `InvalidKeyParts` if the prefix cannot be encoded, or whatever the
/// store reports when opening the session.
pub fn scan_by_prefix<S: AsRef<str>>(
    store: &dyn Store,
    space: &Space,
    table: &str,
    leading: &[S],
) -> Result<RangeScan> {
    let prefix = key::encode_prefix(table, leading)?;
    let session = store.scan_prefix(space, &prefix)?;
    Ok(RangeScan::new(session))
}

/// Lazy, finite sequence of a key's modifications, oldest first
pub struct KeyHistory {
    session: Box<dyn HistorySession>,
    done: bool,
}

impl KeyHistory {
    /// Take ownership of an open history session
    pub fn new(session: Box<dyn HistorySession>) -> Self {
        Self {
            session,
            done: false,
        }
    }

    /// Release the underlying session
    pub fn close(&mut self) {
        self.done = true;
        self.session.close();
    }
}

impl Iterator for KeyHistory {
    type Item = Result<HistoryEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.session.next() {
            None => {
                self.close();
                None
            }
            Some(Err(e)) => {
                self.close();
                Some(Err(Error::ScanFailed {
                    reason: e.to_string(),
                }))
            }
            Some(Ok(entry)) => Some(Ok(entry)),
        }
    }
}

impl Drop for KeyHistory {
    fn drop(&mut self) {
        self.session.close();
    }
}

impl std::fmt::Debug for KeyHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyHistory").field("done", &self.done).finish()
    }
}
