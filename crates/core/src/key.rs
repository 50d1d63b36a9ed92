//! Composite key codec
//!
//! The store only understands flat byte-string keys ordered lexicographically.
//! Tables with multi-field keys are linearized into that space here.
//!
//! ## Format
//!
//! ```text
//! 0x00 <table> 0x00 <part 1> 0x00 <part 2> 0x00 ... <part N> 0x00
//! ```
//!
//! - The leading `0x00` puts every composite key in its own region of the key
//!   space, below any plain key (plain keys may not start with `0x00`).
//! - Each component is terminated by `0x00`, the lowest byte value, so
//!   `encode(t, [a])` sorts before `encode(t, [a, b])` and before
//!   `encode(t, [a'])` whenever `a < a'`.
//! - Because every component is terminated, the encoding of a leading subset
//!   of parts is a byte prefix of the full key. This is what makes
//!   "query by the first N key fields" a plain prefix scan.
//!
//! ## Reserved characters
//!
//! - U+0000 is the separator and cannot appear inside a component
//! - U+10FFFF is reserved as the maximum code point (exclusive scan bound)

use crate::error::{Error, Result};
use std::fmt;

/// Namespace byte that starts every composite key
pub const COMPOSITE_KEY_NAMESPACE: u8 = 0x00;

/// Terminator written after every component
pub const COMPONENT_SEPARATOR: u8 = 0x00;

/// Code point reserved as the maximum Unicode value
pub const MAX_UNICODE_RUNE: char = '\u{10FFFF}';

/// A decoded composite key: table name plus ordered key parts
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositeKey {
    /// Table (namespace) the key belongs to
    pub table: String,
    /// Ordered key parts
    pub parts: Vec<String>,
}

impl CompositeKey {
    /// Build a composite key, validating every component
    pub fn new(table: impl Into<String>, parts: Vec<String>) -> Result<Self> {
        let key = Self {
            table: table.into(),
            parts,
        };
        if key.parts.is_empty() {
            return Err(Error::invalid_key_parts(format!(
                "composite key for table '{}' needs at least one part",
                key.table
            )));
        }
        validate_table(&key.table)?;
        for part in &key.parts {
            validate_part(part)?;
        }
        Ok(key)
    }

    /// Encode to the flat store key
    pub fn encode(&self) -> Vec<u8> {
        encode_unchecked(&self.table, &self.parts)
    }

    /// Decode a key read back from the store
    pub fn decode(key: &[u8]) -> Result<Self> {
        decode(key)
    }

    /// Render the first key part (single-field tables)
    pub fn first_part(&self) -> &str {
        self.parts.first().map(String::as_str).unwrap_or("")
    }

    /// Render all key parts joined with `,`
    ///
    /// Lossy when a part itself contains a comma.
    pub fn joined_parts(&self) -> String {
        self.parts.join(",")
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.table, self.joined_parts())
    }
}

/// Encode `(table, parts)` into a flat store key
///
/// # Errors
///
/// Returns `InvalidKeyParts` if the table is empty, no parts are given, or a
/// component contains a reserved character.
///
/// # Examples
///
/// ```
/// use ledgerkit_core::key::{decode, encode};
///
/// let key = encode("orders", &["alice", "2024"]).unwrap();
/// assert_eq!(key, b"\x00orders\x00alice\x002024\x00".to_vec());
///
/// let decoded = decode(&key).unwrap();
/// assert_eq!(decoded.table, "orders");
/// assert_eq!(decoded.parts, vec!["alice".to_string(), "2024".to_string()]);
/// ```
pub fn encode<S: AsRef<str>>(table: &str, parts: &[S]) -> Result<Vec<u8>> {
    if parts.is_empty() {
        return Err(Error::invalid_key_parts(format!(
            "composite key for table '{}' needs at least one part",
            table
        )));
    }
    encode_prefix(table, parts)
}

/// Encode a partial composite key for prefix scans
///
/// Same as [`encode`] but `leading` may be empty, selecting the whole table.
pub fn encode_prefix<S: AsRef<str>>(table: &str, leading: &[S]) -> Result<Vec<u8>> {
    validate_table(table)?;
    for part in leading {
        validate_part(part.as_ref())?;
    }
    Ok(encode_unchecked(table, leading))
}

fn encode_unchecked<S: AsRef<str>>(table: &str, parts: &[S]) -> Vec<u8> {
    let len = 2 + table.len() + parts.iter().map(|p| p.as_ref().len() + 1).sum::<usize>();
    let mut key = Vec::with_capacity(len);
    key.push(COMPOSITE_KEY_NAMESPACE);
    key.extend_from_slice(table.as_bytes());
    key.push(COMPONENT_SEPARATOR);
    for part in parts {
        key.extend_from_slice(part.as_ref().as_bytes());
        key.push(COMPONENT_SEPARATOR);
    }
    key
}

/// Decode a flat store key back into `(table, parts)`
///
/// # Errors
///
/// Returns `MalformedKey` if the key was not produced by [`encode`].
pub fn decode(key: &[u8]) -> Result<CompositeKey> {
    if key.first() != Some(&COMPOSITE_KEY_NAMESPACE) {
        return Err(Error::malformed_key(
            "missing composite key namespace byte",
        ));
    }
    if key.len() < 2 || key.last() != Some(&COMPONENT_SEPARATOR) {
        return Err(Error::malformed_key("truncated composite key"));
    }

    let body = &key[1..key.len() - 1];
    let mut components = body.split(|b| *b == COMPONENT_SEPARATOR).map(|raw| {
        let s = std::str::from_utf8(raw)
            .map_err(|e| Error::malformed_key(format!("component is not UTF-8: {}", e)))?;
        if s.contains(MAX_UNICODE_RUNE) {
            return Err(Error::malformed_key("component contains U+10FFFF"));
        }
        Ok(s.to_string())
    });

    let table = match components.next() {
        Some(table) => table?,
        None => return Err(Error::malformed_key("missing table component")),
    };
    if table.is_empty() {
        return Err(Error::malformed_key("empty table component"));
    }

    let parts = components.collect::<Result<Vec<_>>>()?;
    if parts.is_empty() {
        return Err(Error::malformed_key(format!(
            "key for table '{}' has no parts",
            table
        )));
    }

    Ok(CompositeKey { table, parts })
}

/// Validate a plain (non-composite) key
///
/// Plain keys must be non-empty and must not start with the composite
/// namespace byte, so they never show up inside a table scan.
pub fn validate_plain_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::invalid_argument("key must not be empty"));
    }
    if key.as_bytes()[0] == COMPOSITE_KEY_NAMESPACE {
        return Err(Error::invalid_argument(
            "key must not begin with the composite key namespace byte (U+0000)",
        ));
    }
    Ok(())
}

fn validate_table(table: &str) -> Result<()> {
    if table.is_empty() {
        return Err(Error::invalid_key_parts("table name must not be empty"));
    }
    validate_component(table, "table name")
}

fn validate_part(part: &str) -> Result<()> {
    validate_component(part, "key part")
}

fn validate_component(component: &str, what: &str) -> Result<()> {
    for c in component.chars() {
        if c == '\u{0}' {
            return Err(Error::invalid_key_parts(format!(
                "{} '{}' contains U+0000",
                what,
                component.escape_default()
            )));
        }
        if c == MAX_UNICODE_RUNE {
            return Err(Error::invalid_key_parts(format!(
                "{} '{}' contains U+10FFFF",
                what,
                component.escape_default()
            )));
        }
    }
    Ok(())
}
