//! Primitives layer for ledgerkit
//!
//! Provides the table layer as stateless facades over a `Store`:
//! - **TableStore**: composite-key indexed tables with prefix scans
//! - **KvStore**: plain single-string keys
//! - **PrivateData**: collection-scoped operations routed by caller identity
//! - **CollectionRouter**: identity → collection mapping with aggregate fan-out
//!
//! Supporting pieces:
//! - `scan`: the prefix range reader ([`RangeScan`]) and history reader
//! - `aggregate`: result sets and their JSON rendering
//! - `transient`: typed records read from the transient side channel
//!
//! ## Design Principle: Stateless Facades
//!
//! Every primitive holds only an `Arc<dyn Store>` (plus, for private data, the
//! router). All persisted state lives in the store; nothing is cached between
//! calls, so any number of facades over the same store are safe.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregate;
pub mod kv;
pub mod private;
pub mod router;
pub mod scan;
pub mod table;
pub mod transient;

pub use aggregate::{KeyRendering, PartitionedResult, QueryRecord, RecordStyle, ResultSet};
pub use kv::KvStore;
pub use private::{sha256_hex, PrivateData, PrivateRead, PrivateScan};
pub use router::{CollectionRoute, CollectionRouter, Route, RouterConfig};
pub use scan::{scan_by_prefix, KeyHistory, RangeScan, ScanRow};
pub use table::TableStore;
pub use transient::{read_transient, DocumentInput, HashRequest, KeyValueInput};
