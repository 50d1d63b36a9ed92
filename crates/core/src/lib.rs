//! Core types and traits for ledgerkit
//!
//! This crate defines the foundational types used throughout the system:
//! - Error: the operation error taxonomy
//! - key: composite key codec (table + ordered parts ↔ flat store key)
//! - Space / CollectionName: public state vs. private-data collections
//! - HistoryEntry: one recorded modification of a key
//! - Traits: collaborator seams (Store, ScanSession, HistorySession,
//!   TransientSource, IdentitySource)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod history;
pub mod key;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use history::HistoryEntry;
pub use key::CompositeKey;
pub use traits::{
    FixedIdentity, HistorySession, IdentitySource, ScanEntry, ScanSession, Store,
    TransientMap, TransientSource,
};
pub use types::{CollectionName, Space};
