//! Storage-layer value wrapper
//!
//! Callers of the `Store` trait only ever see raw bytes. The storage layer
//! additionally tracks the version that produced each value.

/// A stored value together with the version of the write that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredValue {
    value: Vec<u8>,
    version: u64,
}

impl StoredValue {
    /// Create a new stored value
    pub fn new(value: Vec<u8>, version: u64) -> Self {
        StoredValue { value, version }
    }

    /// Get the value bytes
    #[inline]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Get the version
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }
}
