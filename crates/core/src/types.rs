//! Core types for ledgerkit
//!
//! - CollectionName: name of a private-data partition
//! - Space: which key space a store call targets (public state or a collection)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a private-data collection
///
/// Collections are a prefix convention in the store, not a registry: a
/// collection exists as soon as something is written to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionName(String);

impl CollectionName {
    /// Wrap a collection name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CollectionName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CollectionName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Key space targeted by a store operation
///
/// Ordering: Public < Collection(a) < Collection(b) for a < b. Keys in
/// different spaces never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Space {
    /// Globally replicated public state
    Public,
    /// A named private-data collection
    Collection(CollectionName),
}

impl Space {
    /// Create a collection space
    pub fn collection(name: impl Into<CollectionName>) -> Self {
        Space::Collection(name.into())
    }

    /// Get the collection name, if this is a collection space
    pub fn collection_name(&self) -> Option<&CollectionName> {
        match self {
            Space::Public => None,
            Space::Collection(name) => Some(name),
        }
    }

    /// True for the public space
    pub fn is_public(&self) -> bool {
        matches!(self, Space::Public)
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Space::Public => f.write_str("public"),
            Space::Collection(name) => write!(f, "collection:{}", name),
        }
    }
}
