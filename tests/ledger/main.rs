//! Ledger Layer Tests
//!
//! End-to-end tests through the public `ledgerkit` API:
//! - Function dispatch and argument validation
//! - Composite-key tables in public state
//! - Private collections routed by caller identity
//! - Configuration loading

mod common;

mod config_loading;
mod dispatch;
mod logging;
mod private_collections;
mod table_scenarios;
