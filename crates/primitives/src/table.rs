//! TableStore: composite-key indexed tables
//!
//! ## Design
//!
//! TableStore is a stateless facade over a [`Store`]. It holds no in-memory
//! state beyond an `Arc<dyn Store>` reference. A table exists only as a key
//! prefix: it is created by its first write and never destroyed.
//!
//! ## Space Isolation
//!
//! Every operation names the [`Space`] it targets. The same table name in
//! public state and in a collection are unrelated.
//!
//! ## API
//!
//! - **Row API**: `put`, `get`, `delete`
//! - **Scans**: `scan` (lazy), `query` (collected, empty allowed),
//!   `scan_single` / `scan_multi` (collected, empty is `NoMatchingRows`)
//! - **History**: `history_of` (public space only)

use std::sync::Arc;

use ledgerkit_core::key;
use ledgerkit_core::{CompositeKey, Error, Result, Space, Store};
use tracing::debug;

use crate::aggregate::{KeyRendering, ResultSet};
use crate::scan::{scan_by_prefix, KeyHistory, RangeScan};

/// Composite-key table primitive
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ledgerkit_core::Space;
/// use ledgerkit_primitives::TableStore;
/// use ledgerkit_storage::MemoryStore;
///
/// let tables = TableStore::new(Arc::new(MemoryStore::new()));
/// tables.put(&Space::Public, "orders", &["alice", "2024"], b"10".to_vec()).unwrap();
///
/// let rows = tables.scan_multi(&Space::Public, "orders", &["alice"]).unwrap();
/// assert_eq!(rows.keys(), vec!["alice,2024"]);
/// ```
#[derive(Clone)]
pub struct TableStore {
    store: Arc<dyn Store>,
}

impl TableStore {
    /// Create a new TableStore over `store`
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Get the underlying store
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Create or replace the row at `(table, parts)`
    pub fn put<S: AsRef<str>>(
        &self,
        space: &Space,
        table: &str,
        parts: &[S],
        value: Vec<u8>,
    ) -> Result<()> {
        let k = key::encode(table, parts)?;
        self.store.put(space, &k, value)?;
        debug!(target: "ledgerkit::table", %space, table, parts = parts.len(), "put row");
        Ok(())
    }

    /// Read the row at `(table, parts)`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the row is absent.
    pub fn get<S: AsRef<str>>(&self, space: &Space, table: &str, parts: &[S]) -> Result<Vec<u8>> {
        let k = key::encode(table, parts)?;
        self.store
            .get(space, &k)?
            .ok_or_else(|| Error::not_found(render(table, parts)))
    }

    /// True when a row exists at `(table, parts)`
    pub fn exists<S: AsRef<str>>(&self, space: &Space, table: &str, parts: &[S]) -> Result<bool> {
        let k = key::encode(table, parts)?;
        Ok(self.store.get(space, &k)?.is_some())
    }

    /// Remove the row at `(table, parts)`; absent rows are not an error
    pub fn delete<S: AsRef<str>>(&self, space: &Space, table: &str, parts: &[S]) -> Result<()> {
        let k = key::encode(table, parts)?;
        self.store.delete(space, &k)?;
        debug!(target: "ledgerkit::table", %space, table, "delete row");
        Ok(())
    }

    /// Lazy scan of every row whose leading parts equal `leading`
    pub fn scan<S: AsRef<str>>(
        &self,
        space: &Space,
        table: &str,
        leading: &[S],
    ) -> Result<RangeScan> {
        scan_by_prefix(self.store.as_ref(), space, table, leading)
    }

    /// Collect a scan into a result set; an empty result is not an error
    pub fn query<S: AsRef<str>>(
        &self,
        space: &Space,
        table: &str,
        leading: &[S],
        rendering: KeyRendering,
    ) -> Result<ResultSet> {
        let set = ResultSet::collect(self.scan(space, table, leading)?, rendering)?;
        debug!(target: "ledgerkit::table", %space, table, rows = set.len(), "query");
        Ok(set)
    }

    /// Scan a single-field table by its key part
    ///
    /// A blank `prefix` (empty or whitespace only) selects the whole table.
    /// Keys are rendered as their first part.
    ///
    /// # Errors
    ///
    /// Returns `NoMatchingRows` when nothing matches.
    pub fn scan_single(&self, space: &Space, table: &str, prefix: &str) -> Result<ResultSet> {
        let leading: &[&str] = if prefix.trim().is_empty() {
            &[]
        } else {
            std::slice::from_ref(&prefix)
        };
        let set = self.query(space, table, leading, KeyRendering::First)?;
        non_empty(set, table, leading)
    }

    /// Scan a multi-field table by its leading parts
    ///
    /// Keys are rendered as all parts joined with `,`.
    ///
    /// # Errors
    ///
    /// Returns `NoMatchingRows` when nothing matches.
    pub fn scan_multi<S: AsRef<str>>(
        &self,
        space: &Space,
        table: &str,
        leading: &[S],
    ) -> Result<ResultSet> {
        let set = self.query(space, table, leading, KeyRendering::Joined)?;
        non_empty(set, table, leading)
    }

    /// Every historical value of a public row, oldest first
    pub fn history_of<S: AsRef<str>>(&self, table: &str, parts: &[S]) -> Result<KeyHistory> {
        let k = key::encode(table, parts)?;
        Ok(KeyHistory::new(self.store.history(&k)?))
    }
}

impl std::fmt::Debug for TableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableStore").finish_non_exhaustive()
    }
}

fn render<S: AsRef<str>>(table: &str, parts: &[S]) -> String {
    match CompositeKey::new(table, parts.iter().map(|p| p.as_ref().to_string()).collect()) {
        Ok(k) => k.to_string(),
        Err(_) => table.to_string(),
    }
}

fn non_empty<S: AsRef<str>>(set: ResultSet, table: &str, leading: &[S]) -> Result<ResultSet> {
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
    Ok(set)
}
