//! Error types for ledgerkit
//!
//! Every failure an operation can report is a variant of [`Error`]. Errors are
//! terminal for the operation that produced them: nothing in the core retries.
//! We use `thiserror` for the `Display` and `Error` implementations.

use thiserror::Error;

/// Result type alias for ledgerkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for table, key-value and private-data operations
///
/// | Category | Variants |
/// |----------|----------|
/// | Input | `ArgumentCountMismatch`, `InvalidArgument`, `UnknownOperation`, `TransientDecodeError` |
/// | Keys | `InvalidKeyParts`, `MalformedKey` |
/// | Lookup | `NotFound`, `NoMatchingRows`, `AlreadyExists` |
/// | Access | `UnknownIdentity`, `WriteNotPermitted` |
/// | Store | `ScanFailed`, `StoreUnavailable` |
/// | Setup | `Config` |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Wrong number of positional arguments for an operation
    #[error("incorrect arguments for {operation}: expecting {expected}, got {actual}")]
    ArgumentCountMismatch {
        /// Operation name as received from the caller
        operation: String,
        /// Human-readable description of the expected arguments
        expected: String,
        /// Number of arguments actually supplied
        actual: usize,
    },

    /// An argument was present but could not be interpreted
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument
        reason: String,
    },

    /// The function name does not match any supported operation
    #[error("unknown operation: {name}")]
    UnknownOperation {
        /// The unrecognised function name
        name: String,
    },

    /// Table name or key part cannot be encoded into a composite key
    #[error("invalid key parts: {reason}")]
    InvalidKeyParts {
        /// Why encoding was refused
        reason: String,
    },

    /// A stored key is not a well-formed composite key
    #[error("malformed composite key: {reason}")]
    MalformedKey {
        /// Why decoding failed
        reason: String,
    },

    /// No value is stored at the requested key
    #[error("not found: {key}")]
    NotFound {
        /// Printable form of the key that was looked up
        key: String,
    },

    /// A range scan matched no rows
    #[error("no rows in table '{table}' match prefix [{prefix}]")]
    NoMatchingRows {
        /// Table that was scanned
        table: String,
        /// Comma-joined leading key parts used for the scan
        prefix: String,
    },

    /// A create-only write found an existing value
    #[error("already exists: {key}")]
    AlreadyExists {
        /// Printable form of the existing key
        key: String,
    },

    /// The store reported an error while a scan was in progress
    #[error("scan failed: {reason}")]
    ScanFailed {
        /// Underlying store error message
        reason: String,
    },

    /// A transient input was missing or could not be decoded
    #[error("transient input '{name}' could not be decoded: {reason}")]
    TransientDecodeError {
        /// Name of the transient entry
        name: String,
        /// Why decoding failed
        reason: String,
    },

    /// The caller identity is not mapped to any collection
    #[error("unknown identity: {identity}")]
    UnknownIdentity {
        /// The identity that could not be resolved
        identity: String,
    },

    /// The caller may read but not write private data
    #[error("identity '{identity}' is not permitted to write")]
    WriteNotPermitted {
        /// The read-only identity
        identity: String,
    },

    /// Any store I/O failure not classified above
    #[error("store unavailable: {reason}")]
    StoreUnavailable {
        /// Underlying store error message
        reason: String,
    },

    /// Configuration could not be read, parsed or written
    #[error("configuration error: {reason}")]
    Config {
        /// What went wrong
        reason: String,
    },
}

impl Error {
    /// Create an `InvalidArgument` error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Create an `InvalidKeyParts` error
    pub fn invalid_key_parts(reason: impl Into<String>) -> Self {
        Error::InvalidKeyParts {
            reason: reason.into(),
        }
    }

    /// Create a `MalformedKey` error
    pub fn malformed_key(reason: impl Into<String>) -> Self {
        Error::MalformedKey {
            reason: reason.into(),
        }
    }

    /// Create a `NotFound` error
    pub fn not_found(key: impl Into<String>) -> Self {
        Error::NotFound { key: key.into() }
    }

    /// Create a `StoreUnavailable` error
    pub fn store_unavailable(reason: impl Into<String>) -> Self {
        Error::StoreUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a `TransientDecodeError` error
    pub fn transient_decode(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::TransientDecodeError {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a `Config` error
    pub fn config(reason: impl Into<String>) -> Self {
        Error::Config {
            reason: reason.into(),
        }
    }

    /// Get the reason code for the wire protocol
    pub fn reason_code(&self) -> &'static str {
        match self {
            Error::ArgumentCountMismatch { .. } => "argument_count_mismatch",
            Error::InvalidArgument { .. } => "invalid_argument",
            Error::UnknownOperation { .. } => "unknown_operation",
            Error::InvalidKeyParts { .. } => "invalid_key_parts",
            Error::MalformedKey { .. } => "malformed_key",
            Error::NotFound { .. } => "not_found",
            Error::NoMatchingRows { .. } => "no_matching_rows",
            Error::AlreadyExists { .. } => "already_exists",
            Error::ScanFailed { .. } => "scan_failed",
            Error::TransientDecodeError { .. } => "transient_decode_error",
            Error::UnknownIdentity { .. } => "unknown_identity",
            Error::WriteNotPermitted { .. } => "write_not_permitted",
            Error::StoreUnavailable { .. } => "store_unavailable",
            Error::Config { .. } => "config_error",
        }
    }

    /// True for the expected "nothing there" outcomes of reads
    ///
    /// These are normal results, distinct from infrastructure failures.
    pub fn is_absent(&self) -> bool {
        matches!(self, Error::NotFound { .. } | Error::NoMatchingRows { .. })
    }
}
