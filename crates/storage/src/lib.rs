//! Storage layer for ledgerkit
//!
//! This crate implements the in-process reference backend for the `Store`
//! trait:
//! - MemoryStore: BTreeMap-based storage with RwLock, one range per space
//! - Version management with AtomicU64
//! - Public-state history log
//! - Snapshot scan and history sessions with open-session accounting

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
pub mod session;
pub mod stored_value;

pub use memory::MemoryStore;
pub use session::{MemoryHistory, MemoryScan, SessionGuard};
pub use stored_value::StoredValue;
