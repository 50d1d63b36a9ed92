//! Command enum defining every ledger operation.
//!
//! Commands are the instruction set of ledgerkit. Incoming invocations carry
//! a function name and ordered string arguments; [`Command::parse`] validates
//! them once, at the boundary, and produces a typed variant. Handlers never
//! look at raw argument lists.
//!
//! Commands are:
//! - **Self-contained**: all positional parameters are in the variant
//! - **Typed**: no generic fallback, every operation has explicit fields
//! - **Pure data**: identity and transient inputs come from the invocation

use ledgerkit_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// A parsed, validated operation.
///
/// # Command Categories
///
/// | Category | Count | Description |
/// |----------|-------|-------------|
/// | KV | 4 | Plain keys in public state |
/// | Private KV | 7 | Plain keys in the caller's collection, including transient inputs |
/// | Table | 6 | Composite-key tables in public state |
/// | Private table | 4 | Composite-key tables in the caller's collection |
///
/// # Example
///
/// ```
/// use ledgerkit_executor::Command;
///
/// let args: Vec<String> = ["orders", "2", "alice", "2024", "10"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let cmd = Command::parse("set_table_multi_key", &args).unwrap();
/// assert_eq!(
///     cmd,
///     Command::TablePut {
///         table: "orders".into(),
///         parts: vec!["alice".into(), "2024".into()],
///         value: "10".into(),
///     }
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    // ==================== KV (4) ====================
    /// Create or replace a plain key.
    /// Returns: `Output::Value` (the value written)
    Set { key: String, value: String },

    /// Read a plain key.
    /// Returns: `Output::Value`
    Get { key: String },

    /// Remove a plain key.
    /// Returns: `Output::Value` (the key)
    Delete { key: String },

    /// Modification history of a plain key.
    /// Returns: `Output::History`
    History { key: String },

    // ==================== Private KV (7) ====================
    /// Write a plain key into the caller's collection.
    /// Returns: `Output::Value` (the value written)
    SetPrivate { key: String, value: String },

    /// Read a plain key from the caller's collection(s).
    /// Returns: `Output::Value` or `Output::Tagged`
    GetPrivate { key: String },

    /// Remove a plain key from the caller's collection.
    /// Returns: `Output::Value` (the key)
    DeletePrivate { key: String },

    /// Write the transient `keyvalue` record to public state.
    /// Returns: `Output::Value` (the value written)
    SetTransient,

    /// Write the transient `keyvalue` record to the caller's collection.
    /// Returns: `Output::Value` (the value written)
    SetPrivateTransient,

    /// Create the transient `document` record in the caller's collection.
    /// Returns: `Output::Value` (the document id)
    CreateDocument,

    /// SHA-256 of the private value named by the transient `hashReq` record.
    /// Returns: `Output::Value` (hex digest) or `Output::Tagged`
    PrivateHash,

    // ==================== Table (6) ====================
    /// Create or replace a row.
    /// Returns: `Output::Value` (the value written)
    TablePut {
        table: String,
        parts: Vec<String>,
        value: String,
    },

    /// Read one row.
    /// Returns: `Output::Value`
    TableGet { table: String, parts: Vec<String> },

    /// Remove one row.
    /// Returns: `Output::Value` (the last key part)
    TableDelete { table: String, parts: Vec<String> },

    /// Scan a single-field table by key part (blank = whole table).
    /// Returns: `Output::Rows` (first-part keys, text records)
    TableScan { table: String, prefix: String },

    /// Scan a multi-field table by leading parts.
    /// Returns: `Output::Rows` (comma-joined keys, text records)
    TableScanMulti { table: String, leading: Vec<String> },

    /// Modification history of one row.
    /// Returns: `Output::History`
    TableHistory { table: String, parts: Vec<String> },

    // ==================== Private table (4) ====================
    /// Create or replace a row in the caller's collection.
    /// Returns: `Output::Value` (the last key part)
    PrivatePut {
        table: String,
        parts: Vec<String>,
        value: String,
    },

    /// Read one row from the caller's collection(s).
    /// Returns: `Output::Value` or `Output::Tagged`
    PrivateGet { table: String, parts: Vec<String> },

    /// Remove a row from the caller's collection.
    /// Returns: `Output::Value` (the last key part)
    PrivateDelete { table: String, parts: Vec<String> },

    /// Scan rows in the caller's collection(s).
    /// Returns: `Output::Rows` or `Output::Partitioned` (embedded records)
    PrivateScan { table: String, leading: Vec<String> },
}

impl Command {
    /// Map an incoming function name and its arguments to a command
    ///
    /// Multi-field operations take an explicit count `n` followed by exactly
    /// `n` key parts, then (for writes) exactly one value.
    ///
    /// # Errors
    ///
    /// - `UnknownOperation` for an unrecognised function name
    /// - `ArgumentCountMismatch` when the argument count is wrong
    /// - `InvalidArgument` when a count is not a non-negative integer
    pub fn parse(function: &str, args: &[String]) -> Result<Command> {
        let a = Args::new(function, args);
        let cmd = match function {
            // KV
            "set" | "store" => {
                a.exact(2, "a key and a value")?;
                Command::Set {
                    key: a.at(0),
                    value: a.at(1),
                }
            }
            "get" => Command::Get { key: a.single_key()? },
            "delete" => Command::Delete { key: a.single_key()? },
            "GetKeyHisLog" => Command::History { key: a.single_key()? },

            // Private KV
            "setPrivate" => {
                a.exact(2, "a key and a value")?;
                Command::SetPrivate {
                    key: a.at(0),
                    value: a.at(1),
                }
            }
            "getPrivate" => Command::GetPrivate { key: a.single_key()? },
            "deletePrivate" => Command::DeletePrivate { key: a.single_key()? },
            "setTransient" => {
                a.exact(0, "no arguments (input is transient)")?;
                Command::SetTransient
            }
            "setPrivateTransient" => {
                a.exact(0, "no arguments (input is transient)")?;
                Command::SetPrivateTransient
            }
            "createNewDocument" => {
                a.exact(0, "no arguments (input is transient)")?;
                Command::CreateDocument
            }
            "getHash" => {
                a.exact(0, "no arguments (input is transient)")?;
                Command::PrivateHash
            }

            // Table
            "set_table" => {
                let (table, parts, value) = a.single_write()?;
                Command::TablePut { table, parts, value }
            }
            "set_table_multi_key" => {
                let (table, parts, value) = a.multi_write()?;
                Command::TablePut { table, parts, value }
            }
            "get_table" => {
                a.exact(2, "a table name and a key")?;
                Command::TableScan {
                    table: a.at(0),
                    prefix: a.at(1),
                }
            }
            "get_table_multi_key" => {
                let (table, leading) = a.multi_scan()?;
                Command::TableScanMulti { table, leading }
            }
            "get_table_row" => {
                let (table, parts) = a.single_row()?;
                Command::TableGet { table, parts }
            }
            "get_table_row_multi_key" => {
                let (table, parts) = a.multi_row()?;
                Command::TableGet { table, parts }
            }
            "delete_table" => {
                let (table, parts) = a.single_row()?;
                Command::TableDelete { table, parts }
            }
            "delete_table_multi_key" => {
                let (table, parts) = a.multi_row()?;
                Command::TableDelete { table, parts }
            }
            "table_history" => {
                let (table, parts) = a.single_row()?;
                Command::TableHistory { table, parts }
            }
            "table_history_multi_key" => {
                let (table, parts) = a.multi_row()?;
                Command::TableHistory { table, parts }
            }

            // Private table
            "insert_or_modify" => {
                let (table, parts, value) = a.single_write()?;
                Command::PrivatePut { table, parts, value }
            }
            "insert_or_modify_multi_key" => {
                let (table, parts, value) = a.multi_write()?;
                Command::PrivatePut { table, parts, value }
            }
            "get_table_private" => {
                let (table, parts) = a.single_row()?;
                Command::PrivateGet { table, parts }
            }
            "delete_table_private" => {
                let (table, parts) = a.single_row()?;
                Command::PrivateDelete { table, parts }
            }
            "get_table_private_scan" => {
                let (table, leading) = a.multi_scan()?;
                Command::PrivateScan { table, leading }
            }

            other => {
                return Err(Error::UnknownOperation {
                    name: other.to_string(),
                })
            }
        };
        Ok(cmd)
    }

    /// Get the command name (for logging)
    pub fn name(&self) -> &'static str {
        match self {
            Command::Set { .. } => "Set",
            Command::Get { .. } => "Get",
            Command::Delete { .. } => "Delete",
            Command::History { .. } => "History",
            Command::SetPrivate { .. } => "SetPrivate",
            Command::GetPrivate { .. } => "GetPrivate",
            Command::DeletePrivate { .. } => "DeletePrivate",
            Command::SetTransient => "SetTransient",
            Command::SetPrivateTransient => "SetPrivateTransient",
            Command::CreateDocument => "CreateDocument",
            Command::PrivateHash => "PrivateHash",
            Command::TablePut { .. } => "TablePut",
            Command::TableGet { .. } => "TableGet",
            Command::TableDelete { .. } => "TableDelete",
            Command::TableScan { .. } => "TableScan",
            Command::TableScanMulti { .. } => "TableScanMulti",
            Command::TableHistory { .. } => "TableHistory",
            Command::PrivatePut { .. } => "PrivatePut",
            Command::PrivateGet { .. } => "PrivateGet",
            Command::PrivateDelete { .. } => "PrivateDelete",
            Command::PrivateScan { .. } => "PrivateScan",
        }
    }

    /// True when the command never writes
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            Command::Get { .. }
                | Command::History { .. }
                | Command::GetPrivate { .. }
                | Command::PrivateHash
                | Command::TableGet { .. }
                | Command::TableScan { .. }
                | Command::TableScanMulti { .. }
                | Command::TableHistory { .. }
                | Command::PrivateGet { .. }
                | Command::PrivateScan { .. }
        )
    }
}

/// Positional argument reader bound to one function name
struct Args<'a> {
    function: &'a str,
    args: &'a [String],
}

impl<'a> Args<'a> {
    fn new(function: &'a str, args: &'a [String]) -> Self {
        Self { function, args }
    }

    fn at(&self, i: usize) -> String {
        self.args.get(i).cloned().unwrap_or_default()
    }

    fn mismatch(&self, expected: impl Into<String>) -> Error {
        Error::ArgumentCountMismatch {
            operation: self.function.to_string(),
            expected: expected.into(),
            actual: self.args.len(),
        }
    }

    fn exact(&self, n: usize, what: &str) -> Result<()> {
        if self.args.len() != n {
            return Err(self.mismatch(what));
        }
        Ok(())
    }

    fn single_key(&self) -> Result<String> {
        self.exact(1, "a key")?;
        Ok(self.at(0))
    }

    /// `table key value`
    fn single_write(&self) -> Result<(String, Vec<String>, String)> {
        self.exact(3, "a table name, a key and a value")?;
        Ok((self.at(0), vec![self.at(1)], self.at(2)))
    }

    /// `table key`
    fn single_row(&self) -> Result<(String, Vec<String>)> {
        self.exact(2, "a table name and a key")?;
        Ok((self.at(0), vec![self.at(1)]))
    }

    /// Parse the count at position 1; blank counts as zero when allowed
    fn count(&self, blank_is_zero: bool) -> Result<usize> {
        let raw = self.at(1);
        let trimmed = raw.trim();
        if trimmed.is_empty() && blank_is_zero {
            return Ok(0);
        }
        trimmed.parse::<usize>().map_err(|_| {
            Error::invalid_argument(format!(
                "key count for {} must be a non-negative integer, got '{}'",
                self.function, raw
            ))
        })
    }

    /// Require exactly `n` counted arguments after `fixed` positional ones
    fn counted(&self, n: usize, fixed: usize, what: String) -> Result<()> {
        if self.args.len().checked_sub(fixed) == Some(n) {
            return Ok(());
        }
        let expected = match n.checked_add(fixed) {
            Some(total) => format!("{} ({})", total, what),
            None => format!("{} keys plus {} arguments ({})", n, fixed, what),
        };
        Err(self.mismatch(expected))
    }

    /// Keys at positions `2..2 + n`; only called after `counted` succeeded
    fn parts(&self, n: usize) -> Vec<String> {
        self.args.iter().skip(2).take(n).cloned().collect()
    }

    /// `table n part1 .. partN value`
    fn multi_write(&self) -> Result<(String, Vec<String>, String)> {
        if self.args.len() < 2 {
            return Err(self.mismatch("a table name, a key count, the keys and a value"));
        }
        let n = self.count(false)?;
        self.counted(
            n,
            3,
            format!("a table name, a key count, {} keys and a value", n),
        )?;
        Ok((self.at(0), self.parts(n), self.at(n + 2)))
    }

    /// `table n part1 .. partN`
    fn multi_row(&self) -> Result<(String, Vec<String>)> {
        if self.args.len() < 2 {
            return Err(self.mismatch("a table name, a key count and the keys"));
        }
        let n = self.count(false)?;
        self.counted(n, 2, format!("a table name, a key count and {} keys", n))?;
        Ok((self.at(0), self.parts(n)))
    }

    /// `table n part1 .. partN`, where a blank `n` selects the whole table
    fn multi_scan(&self) -> Result<(String, Vec<String>)> {
        if self.args.len() < 2 {
            return Err(self.mismatch("a table name, a key count and the leading keys"));
        }
        let n = self.count(true)?;
        self.counted(
            n,
            2,
            format!("a table name, a key count and {} leading keys", n),
        )?;
        Ok((self.at(0), self.parts(n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn parse(function: &str, v: &[&str]) -> Result<Command> {
        Command::parse(function, &args(v))
    }

    // === KV ===

    #[test]
    fn test_parse_set_and_alias() {
        let expected = Command::Set {
            key: "a".into(),
            value: "100".into(),
        };
        assert_eq!(parse("set", &["a", "100"]).unwrap(), expected);
        assert_eq!(parse("store", &["a", "100"]).unwrap(), expected);
    }

    #[test]
    fn test_parse_set_wrong_count() {
        let err = parse("set", &["a"]).unwrap_err();
        assert_eq!(
            err,
            Error::ArgumentCountMismatch {
                operation: "set".into(),
                expected: "a key and a value".into(),
                actual: 1,
            }
        );
    }

    #[test]
    fn test_parse_get_delete_history() {
        assert_eq!(parse("get", &["a"]).unwrap(), Command::Get { key: "a".into() });
        assert_eq!(
            parse("delete", &["a"]).unwrap(),
            Command::Delete { key: "a".into() }
        );
        assert_eq!(
            parse("GetKeyHisLog", &["a"]).unwrap(),
            Command::History { key: "a".into() }
        );
        assert!(parse("get", &[]).is_err());
    }

    #[test]
    fn test_parse_transient_commands_take_no_args() {
        assert_eq!(parse("setTransient", &[]).unwrap(), Command::SetTransient);
        assert_eq!(
            parse("createNewDocument", &[]).unwrap(),
            Command::CreateDocument
        );
        assert_eq!(parse("getHash", &[]).unwrap(), Command::PrivateHash);
        assert!(matches!(
            parse("setPrivateTransient", &["x"]),
            Err(Error::ArgumentCountMismatch { .. })
        ));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse("frobnicate", &[]).unwrap_err(),
            Error::UnknownOperation {
                name: "frobnicate".into()
            }
        );
    }

    // === Tables ===

    #[test]
    fn test_parse_set_table() {
        assert_eq!(
            parse("set_table", &["cars", "car1", "red"]).unwrap(),
            Command::TablePut {
                table: "cars".into(),
                parts: vec!["car1".into()],
                value: "red".into(),
            }
        );
    }

    #[test]
    fn test_parse_multi_write_count_checked() {
        // n = 2 needs exactly 2 parts and 1 value
        assert!(parse("set_table_multi_key", &["orders", "2", "alice", "2024", "10"]).is_ok());
        let err = parse("set_table_multi_key", &["orders", "2", "alice", "10"]).unwrap_err();
        assert!(matches!(
            err,
            Error::ArgumentCountMismatch { actual: 4, .. }
        ));
        assert!(parse(
            "set_table_multi_key",
            &["orders", "2", "alice", "2024", "10", "extra"]
        )
        .is_err());
    }

    #[test]
    fn test_parse_multi_count_not_numeric() {
        let err = parse("set_table_multi_key", &["orders", "two", "a", "b", "v"]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        let err = parse("get_table_multi_key", &["orders", "-1"]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_parse_huge_counts_are_mismatches() {
        let max = usize::MAX.to_string();
        let near_max = (usize::MAX - 1).to_string();
        let functions = [
            "set_table_multi_key",
            "insert_or_modify_multi_key",
            "get_table_row_multi_key",
            "delete_table_multi_key",
            "table_history_multi_key",
            "get_table_multi_key",
            "get_table_private_scan",
        ];

        for function in functions {
            for count in [max.as_str(), near_max.as_str(), "1000000"] {
                for trailing in [&[][..], &["alice"][..], &["alice", "2024", "10"][..]] {
                    let mut v = vec!["orders", count];
                    v.extend_from_slice(trailing);
                    let err = parse(function, &v).unwrap_err();
                    assert!(
                        matches!(err, Error::ArgumentCountMismatch { .. }),
                        "{} {:?}: {:?}",
                        function,
                        v,
                        err
                    );
                }
            }
        }
    }

    #[test]
    fn test_parse_multi_scan() {
        assert_eq!(
            parse("get_table_multi_key", &["orders", "1", "alice"]).unwrap(),
            Command::TableScanMulti {
                table: "orders".into(),
                leading: vec!["alice".into()],
            }
        );
        assert_eq!(
            parse("get_table_multi_key", &["orders", " "]).unwrap(),
            Command::TableScanMulti {
                table: "orders".into(),
                leading: vec![],
            }
        );
        assert_eq!(
            parse("get_table_multi_key", &["orders", "0"]).unwrap(),
            Command::TableScanMulti {
                table: "orders".into(),
                leading: vec![],
            }
        );
        assert!(parse("get_table_multi_key", &["orders"]).is_err());
    }

    #[test]
    fn test_parse_get_table_single() {
        assert_eq!(
            parse("get_table", &["cars", ""]).unwrap(),
            Command::TableScan {
                table: "cars".into(),
                prefix: String::new(),
            }
        );
    }

    #[test]
    fn test_parse_row_variants() {
        assert_eq!(
            parse("delete_table_multi_key", &["orders", "2", "alice", "2024"]).unwrap(),
            Command::TableDelete {
                table: "orders".into(),
                parts: vec!["alice".into(), "2024".into()],
            }
        );
        assert_eq!(
            parse("table_history", &["cars", "car1"]).unwrap(),
            Command::TableHistory {
                table: "cars".into(),
                parts: vec!["car1".into()],
            }
        );
    }

    // === Private tables ===

    #[test]
    fn test_parse_private_table() {
        assert_eq!(
            parse("insert_or_modify", &["cars", "car1", "{}"]).unwrap(),
            Command::PrivatePut {
                table: "cars".into(),
                parts: vec!["car1".into()],
                value: "{}".into(),
            }
        );
        assert_eq!(
            parse("get_table_private", &["cars", "car1"]).unwrap(),
            Command::PrivateGet {
                table: "cars".into(),
                parts: vec!["car1".into()],
            }
        );
        assert_eq!(
            parse("get_table_private_scan", &["cars", ""]).unwrap(),
            Command::PrivateScan {
                table: "cars".into(),
                leading: vec![],
            }
        );
    }

    #[test]
    fn test_name_and_read_only() {
        let cmd = parse("get_table_multi_key", &["orders", "0"]).unwrap();
        assert_eq!(cmd.name(), "TableScanMulti");
        assert!(cmd.is_read_only());
        assert!(!parse("set", &["a", "b"]).unwrap().is_read_only());
    }

    #[test]
    fn test_command_serde() {
        let cmd = parse("set_table", &["cars", "car1", "red"]).unwrap();
        let json = serde_json::to_string(&cmd).unwrap();
        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }
}
