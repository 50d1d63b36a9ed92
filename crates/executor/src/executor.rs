//! The Executor - single entry point to the table layer.
//!
//! The Executor is a stateless dispatcher that routes commands to the
//! appropriate primitive operations and converts results to outputs.

use std::sync::Arc;

use ledgerkit_core::Store;
use ledgerkit_primitives::{CollectionRouter, KvStore, PrivateData, TableStore};
use tracing::{debug, info, warn};

use crate::config::LedgerConfig;
use crate::handlers;
use crate::{Command, Invocation, Output, Response, Result};

/// Primitives shared by every handler
#[derive(Debug, Clone)]
pub(crate) struct Primitives {
    pub(crate) tables: TableStore,
    pub(crate) kv: KvStore,
    pub(crate) private: PrivateData,
}

/// The command executor - single entry point to the table layer.
///
/// The Executor is **stateless**: it holds references to the store and the
/// router but maintains no state of its own. All state lives in the store.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads. Each
/// invocation is independent; isolation between concurrent invocations is
/// the store's responsibility.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ledgerkit_executor::{Executor, Invocation, LedgerConfig};
/// use ledgerkit_storage::MemoryStore;
///
/// let executor = Executor::from_config(Arc::new(MemoryStore::new()), &LedgerConfig::default()).unwrap();
/// let inv = Invocation::new("tx1");
///
/// let args = vec!["a".to_string(), "100".to_string()];
/// assert!(executor.invoke("set", &args, &inv).is_ok());
///
/// let resp = executor.invoke("get", &["a".to_string()], &inv);
/// assert_eq!(resp.payload, b"100".to_vec());
/// ```
#[derive(Debug, Clone)]
pub struct Executor {
    primitives: Arc<Primitives>,
}

impl Executor {
    /// Create a new executor over `store`, routing private data with `router`.
    pub fn new(store: Arc<dyn Store>, router: CollectionRouter) -> Self {
        let primitives = Primitives {
            tables: TableStore::new(store.clone()),
            kv: KvStore::new(store.clone()),
            private: PrivateData::new(store, Arc::new(router)),
        };
        Self {
            primitives: Arc::new(primitives),
        }
    }

    /// Create a new executor with the routing table from `config`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an inconsistent routing table.
    pub fn from_config(store: Arc<dyn Store>, config: &LedgerConfig) -> Result<Self> {
        Ok(Self::new(store, config.router()?))
    }

    /// Execute a single command.
    ///
    /// Returns the command result or an error.
    pub fn execute(&self, cmd: Command, inv: &Invocation) -> Result<Output> {
        let p = self.primitives.as_ref();
        debug!(target: "ledgerkit::exec", tx_id = inv.tx_id(), command = cmd.name(), "execute");

        match cmd {
            // KV
            Command::Set { key, value } => handlers::kv::set(p, key, value),
            Command::Get { key } => handlers::kv::get(p, key),
            Command::Delete { key } => handlers::kv::delete(p, key),
            Command::History { key } => handlers::kv::history(p, key),
            Command::SetTransient => handlers::kv::set_transient(p, inv),

            // Private KV
            Command::SetPrivate { key, value } => {
                handlers::private::set_private(p, inv, key, value)
            }
            Command::GetPrivate { key } => handlers::private::get_private(p, inv, key),
            Command::DeletePrivate { key } => handlers::private::delete_private(p, inv, key),
            Command::SetPrivateTransient => handlers::private::set_private_transient(p, inv),
            Command::CreateDocument => handlers::private::create_document(p, inv),
            Command::PrivateHash => handlers::private::private_hash(p, inv),

            // Table
            Command::TablePut {
                table,
                parts,
                value,
            } => handlers::table::put(p, table, parts, value),
            Command::TableGet { table, parts } => handlers::table::get(p, table, parts),
            Command::TableDelete { table, parts } => handlers::table::delete(p, table, parts),
            Command::TableScan { table, prefix } => handlers::table::scan(p, table, prefix),
            Command::TableScanMulti { table, leading } => {
                handlers::table::scan_multi(p, table, leading)
            }
            Command::TableHistory { table, parts } => handlers::table::history(p, table, parts),

            // Private table
            Command::PrivatePut {
                table,
                parts,
                value,
            } => handlers::private::put_row(p, inv, table, parts, value),
            Command::PrivateGet { table, parts } => {
                handlers::private::get_row(p, inv, table, parts)
            }
            Command::PrivateDelete { table, parts } => {
                handlers::private::delete_row(p, inv, table, parts)
            }
            Command::PrivateScan { table, leading } => {
                handlers::private::scan(p, inv, table, leading)
            }
        }
    }

    /// Parse and execute one incoming invocation.
    ///
    /// Never fails: errors become a [`Response`] with status 500, the error's
    /// reason code and its message.
    pub fn invoke(&self, function: &str, args: &[String], inv: &Invocation) -> Response {
        let result = Command::parse(function, args).and_then(|cmd| self.execute(cmd, inv));
        match result {
            Ok(output) => {
                let payload = output.into_payload();
                info!(
                    target: "ledgerkit::exec",
                    tx_id = inv.tx_id(),
                    function,
                    bytes = payload.len(),
                    "invocation succeeded"
                );
                debug!(
                    target: "ledgerkit::exec",
                    tx_id = inv.tx_id(),
                    function,
                    arg_count = args.len(),
                    "invocation arguments"
                );
                Response::success(payload)
            }
            Err(e) => {
                warn!(
                    target: "ledgerkit::exec",
                    tx_id = inv.tx_id(),
                    function,
                    reason = e.reason_code(),
                    error = %e,
                    "invocation failed"
                );
                Response::failure(&e)
            }
        }
    }

    /// Execute several commands in order.
    ///
    /// Each command is independent; one failure does not stop the rest.
    pub fn execute_many(&self, cmds: Vec<Command>, inv: &Invocation) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd, inv)).collect()
    }
}
