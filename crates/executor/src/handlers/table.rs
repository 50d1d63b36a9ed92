//! Table command handlers.
//!
//! Composite-key tables in public state. Scan results render keys as the
//! first part (`get_table`) or all parts comma-joined (`get_table_multi_key`)
//! with text records.

use ledgerkit_core::{Result, Space};
use ledgerkit_primitives::RecordStyle;

use crate::executor::Primitives;
use crate::Output;

/// Handle TablePut command.
pub(crate) fn put(
    p: &Primitives,
    table: String,
    parts: Vec<String>,
    value: String,
) -> Result<Output> {
    p.tables
        .put(&Space::Public, &table, &parts, value.clone().into_bytes())?;
    Ok(Output::text(value))
}

/// Handle TableGet command.
pub(crate) fn get(p: &Primitives, table: String, parts: Vec<String>) -> Result<Output> {
    Ok(Output::Value(p.tables.get(&Space::Public, &table, &parts)?))
}

/// Handle TableDelete command.
pub(crate) fn delete(p: &Primitives, table: String, parts: Vec<String>) -> Result<Output> {
    p.tables.delete(&Space::Public, &table, &parts)?;
    Ok(Output::text(parts.last().cloned().unwrap_or_default()))
}

/// Handle TableScan command.
pub(crate) fn scan(p: &Primitives, table: String, prefix: String) -> Result<Output> {
    let set = p.tables.scan_single(&Space::Public, &table, &prefix)?;
    Ok(Output::Rows {
        set,
        style: RecordStyle::Text,
    })
}

/// Handle TableScanMulti command.
pub(crate) fn scan_multi(p: &Primitives, table: String, leading: Vec<String>) -> Result<Output> {
    let set = p.tables.scan_multi(&Space::Public, &table, &leading)?;
    Ok(Output::Rows {
        set,
        style: RecordStyle::Text,
    })
}

/// Handle TableHistory command.
pub(crate) fn history(p: &Primitives, table: String, parts: Vec<String>) -> Result<Output> {
    let entries = p
        .tables
        .history_of(&table, &parts)?
        .collect::<Result<Vec<_>>>()?;
    Ok(Output::History(entries))
}
