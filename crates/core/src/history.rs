//! History entries for keys in public state
//!
//! The store records one entry per write or delete of a public key. Entries
//! are reported oldest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One modification of a key, as recorded by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Store version assigned to the modification
    pub version: u64,
    /// When the modification was applied
    pub timestamp: DateTime<Utc>,
    /// True when the modification was a delete
    pub is_delete: bool,
    /// Value written (None for deletes)
    pub value: Option<Vec<u8>>,
}

impl HistoryEntry {
    /// Entry for a write
    pub fn write(version: u64, timestamp: DateTime<Utc>, value: Vec<u8>) -> Self {
        Self {
            version,
            timestamp,
            is_delete: false,
            value: Some(value),
        }
    }

    /// Entry for a delete
    pub fn delete(version: u64, timestamp: DateTime<Utc>) -> Self {
        Self {
            version,
            timestamp,
            is_delete: true,
            value: None,
        }
    }
}
