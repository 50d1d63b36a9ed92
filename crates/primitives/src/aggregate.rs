//! Row aggregation and JSON rendering
//!
//! Rows come out of a [`RangeScan`](crate::scan::RangeScan) in store order
//! and are collected into a [`ResultSet`] without reordering. Records are
//! kept as the raw stored bytes; interpretation happens only when the set is
//! serialized.
//!
//! Two record styles exist on the wire:
//!
//! ```text
//! Text:     [{"key":"alice,2024","value":"10"}]
//! Embedded: [{"Key":"car1","Record":{"make":"Toyota"}}]
//! ```
//!
//! Fan-out results wrap one set per collection:
//!
//! ```text
//! [{"collection":"A","records":[...]},{"collection":"B","records":[]}]
//! ```

use ledgerkit_core::{CollectionName, Result};
use serde_json::{json, Value as JsonValue};

use crate::scan::ScanRow;

/// How a decoded composite key is rendered in a result record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRendering {
    /// First key part only (single-field tables)
    First,
    /// All key parts joined with `,` (lossy when a part contains a comma)
    Joined,
}

/// How a record is embedded in serialized output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStyle {
    /// `{"key": .., "value": "<text>"}`
    Text,
    /// `{"Key": .., "Record": <raw JSON>}`
    Embedded,
}

/// One rendered key with its raw record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRecord {
    /// Rendered key
    pub key: String,
    /// Raw stored value
    pub record: Vec<u8>,
}

impl QueryRecord {
    fn to_json(&self, style: RecordStyle) -> JsonValue {
        match style {
            RecordStyle::Text => json!({
                "key": self.key,
                "value": String::from_utf8_lossy(&self.record),
            }),
            RecordStyle::Embedded => {
                let record = serde_json::from_slice::<JsonValue>(&self.record).unwrap_or_else(
                    |_| JsonValue::String(String::from_utf8_lossy(&self.record).into_owned()),
                );
                json!({ "Key": self.key, "Record": record })
            }
        }
    }
}

/// Ordered result of a table query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    records: Vec<QueryRecord>,
}

impl ResultSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain `rows` into a result set, stopping at the first error
    pub fn collect<I>(rows: I, rendering: KeyRendering) -> Result<Self>
    where
        I: IntoIterator<Item = Result<ScanRow>>,
    {
        let mut set = Self::new();
        for row in rows {
            let row = row?;
            let key = match rendering {
                KeyRendering::First => row.key.first_part().to_string(),
                KeyRendering::Joined => row.key.joined_parts(),
            };
            set.push(key, row.value);
        }
        Ok(set)
    }

    /// Append a record
    pub fn push(&mut self, key: impl Into<String>, record: Vec<u8>) {
        self.records.push(QueryRecord {
            key: key.into(),
            record,
        });
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the set has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in scan order
    pub fn records(&self) -> &[QueryRecord] {
        &self.records
    }

    /// Rendered keys in scan order
    pub fn keys(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.key.as_str()).collect()
    }

    /// Serialize as a JSON array value
    pub fn to_json_value(&self, style: RecordStyle) -> JsonValue {
        JsonValue::Array(self.records.iter().map(|r| r.to_json(style)).collect())
    }

    /// Serialize as a JSON array; an empty set yields `[]`
    pub fn to_json(&self, style: RecordStyle) -> String {
        self.to_json_value(style).to_string()
    }
}

/// One result set per collection, in configured order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionedResult {
    partitions: Vec<(CollectionName, ResultSet)>,
}

impl PartitionedResult {
    /// Build from `(collection, set)` pairs
    pub fn new(partitions: Vec<(CollectionName, ResultSet)>) -> Self {
        Self { partitions }
    }

    /// Partitions in configured order
    pub fn partitions(&self) -> &[(CollectionName, ResultSet)] {
        &self.partitions
    }

    /// Total records across every partition
    pub fn total_len(&self) -> usize {
        self.partitions.iter().map(|(_, s)| s.len()).sum()
    }

    /// Serialize as `[{"collection": .., "records": [..]}, ..]`
    pub fn to_json(&self, style: RecordStyle) -> String {
        let parts: Vec<JsonValue> = self
            .partitions
            .iter()
            .map(|(name, set)| {
                json!({
                    "collection": name.as_str(),
                    "records": set.to_json_value(style),
                })
            })
            .collect();
        JsonValue::Array(parts).to_string()
    }
}
