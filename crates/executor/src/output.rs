//! Output and Response types for command execution.
//!
//! Every command produces exactly one output variant. [`Output::into_payload`]
//! turns it into the bytes returned to the caller; [`Response`] wraps the
//! payload (or a failure) with a status code.

use chrono::{DateTime, SecondsFormat, Utc};
use ledgerkit_core::{CollectionName, Error, HistoryEntry};
use ledgerkit_primitives::{PartitionedResult, RecordStyle, ResultSet};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

/// Successful command execution results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Raw bytes (values, echoed keys, digests)
    Value(Vec<u8>),

    /// One result set
    Rows {
        /// Records in scan order
        set: ResultSet,
        /// Record rendering
        style: RecordStyle,
    },

    /// One result set per collection (aggregate scans)
    Partitioned {
        /// Per-collection sets in configured order
        result: PartitionedResult,
        /// Record rendering
        style: RecordStyle,
    },

    /// One value per collection holding it (aggregate single-key reads)
    Tagged(Vec<(CollectionName, Vec<u8>)>),

    /// Modifications of one key, oldest first
    History(Vec<HistoryEntry>),
}

impl Output {
    /// Shorthand for a text value
    pub fn text(s: impl Into<String>) -> Self {
        Output::Value(s.into().into_bytes())
    }

    /// Render the payload returned to the caller
    ///
    /// | Variant | Payload |
    /// |---------|---------|
    /// | `Value` | the raw bytes |
    /// | `Rows` | `[{"key":..,"value":..}]` or `[{"Key":..,"Record":..}]` |
    /// | `Partitioned` | `[{"collection":..,"records":[..]}]` |
    /// | `Tagged` | `[{"collection":..,"value":..}]` |
    /// | `History` | `[{"version":..,"timestamp":..,"is_delete":..,"value":..}]` |
    pub fn into_payload(self) -> Vec<u8> {
        match self {
            Output::Value(bytes) => bytes,
            Output::Rows { set, style } => set.to_json(style).into_bytes(),
            Output::Partitioned { result, style } => result.to_json(style).into_bytes(),
            Output::Tagged(values) => {
                let items: Vec<JsonValue> = values
                    .iter()
                    .map(|(c, v)| {
                        json!({
                            "collection": c.as_str(),
                            "value": String::from_utf8_lossy(v),
                        })
                    })
                    .collect();
                JsonValue::Array(items).to_string().into_bytes()
            }
            Output::History(entries) => {
                let items: Vec<JsonValue> = entries.iter().map(history_json).collect();
                JsonValue::Array(items).to_string().into_bytes()
            }
        }
    }
}

fn history_json(entry: &HistoryEntry) -> JsonValue {
    json!({
        "version": entry.version,
        "timestamp": rfc3339(&entry.timestamp),
        "is_delete": entry.is_delete,
        "value": entry.value.as_ref().map(|v| String::from_utf8_lossy(v).into_owned()),
    })
}

fn rfc3339(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Status code of a successful invocation
pub const STATUS_OK: u16 = 200;
/// Status code of a failed invocation
pub const STATUS_ERROR: u16 = 500;

/// Result of one invocation, as returned to the dispatcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// `STATUS_OK` or `STATUS_ERROR`
    pub status: u16,
    /// Success payload (empty on failure)
    pub payload: Vec<u8>,
    /// Human-readable failure message (empty on success)
    pub message: String,
    /// Stable reason code on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Response {
    /// Successful response carrying `payload`
    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            status: STATUS_OK,
            payload,
            message: String::new(),
            reason: None,
        }
    }

    /// Failed response describing `err`
    pub fn failure(err: &Error) -> Self {
        Self {
            status: STATUS_ERROR,
            payload: Vec::new(),
            message: err.to_string(),
            reason: Some(err.reason_code().to_string()),
        }
    }

    /// True for status 200
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Payload as text (lossy)
    pub fn payload_str(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}

impl From<ledgerkit_core::Result<Output>> for Response {
    fn from(result: ledgerkit_core::Result<Output>) -> Self {
        match result {
            Ok(output) => Response::success(output.into_payload()),
            Err(e) => Response::failure(&e),
        }
    }
}
