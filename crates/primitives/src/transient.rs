//! Transient input records
//!
//! Private writes take their payload from the transient side channel instead
//! of positional arguments, so it never reaches the public log. Each entry is
//! a JSON document with a fixed shape.

use ledgerkit_core::{Error, Result, TransientSource};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Entry name of [`KeyValueInput`]
pub const KEYVALUE_ENTRY: &str = "keyvalue";
/// Entry name of [`DocumentInput`]
pub const DOCUMENT_ENTRY: &str = "document";
/// Entry name of [`HashRequest`]
pub const HASH_REQUEST_ENTRY: &str = "hashReq";

/// `{"key": .., "value": ..}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValueInput {
    /// Plain key
    pub key: String,
    /// Value to store
    pub value: String,
}

/// `{"documentID": .., "documentcontent": ..}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInput {
    /// Document id, used as the plain key
    #[serde(rename = "documentID")]
    pub document_id: String,
    /// Document body
    #[serde(rename = "documentcontent")]
    pub content: String,
}

/// `{"Key": ..}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashRequest {
    /// Plain key whose private value is hashed
    #[serde(rename = "Key")]
    pub key: String,
}

/// Read and decode the transient entry `name`
///
/// # Errors
///
/// Returns `TransientDecodeError` when the entry is missing or is not a JSON
/// document of the expected shape.
pub fn read_transient<T: DeserializeOwned>(source: &dyn TransientSource, name: &str) -> Result<T> {
    let raw = source
        .transient(name)?
        .ok_or_else(|| Error::transient_decode(name, "entry not present"))?;
    serde_json::from_slice(&raw).map_err(|e| Error::transient_decode(name, e.to_string()))
}
