//! Private-data command handlers.
//!
//! Every handler resolves the caller's identity first. Writes go to the
//! caller's own collection; reads by the aggregate identity come back tagged
//! per collection.

use ledgerkit_core::Result;
use ledgerkit_primitives::transient::{
    read_transient, DocumentInput, HashRequest, KeyValueInput, DOCUMENT_ENTRY,
    HASH_REQUEST_ENTRY, KEYVALUE_ENTRY,
};
use ledgerkit_primitives::{KeyRendering, PartitionedResult, PrivateRead, RecordStyle};

use crate::executor::Primitives;
use crate::{Invocation, Output};

fn read_output(read: PrivateRead<Vec<u8>>) -> Output {
    match read {
        PrivateRead::Own(v) => Output::Value(v),
        PrivateRead::Partitioned(values) => Output::Tagged(values),
    }
}

/// Handle SetPrivate command.
pub(crate) fn set_private(
    p: &Primitives,
    inv: &Invocation,
    key: String,
    value: String,
) -> Result<Output> {
    let identity = inv.caller_identity()?;
    p.private.set(&identity, &key, value.clone().into_bytes())?;
    Ok(Output::text(value))
}

/// Handle GetPrivate command.
pub(crate) fn get_private(p: &Primitives, inv: &Invocation, key: String) -> Result<Output> {
    let identity = inv.caller_identity()?;
    Ok(read_output(p.private.get(&identity, &key)?))
}

/// Handle DeletePrivate command.
pub(crate) fn delete_private(p: &Primitives, inv: &Invocation, key: String) -> Result<Output> {
    let identity = inv.caller_identity()?;
    p.private.delete(&identity, &key)?;
    Ok(Output::text(key))
}

/// Handle SetPrivateTransient command.
pub(crate) fn set_private_transient(p: &Primitives, inv: &Invocation) -> Result<Output> {
    let input: KeyValueInput = read_transient(inv.transient(), KEYVALUE_ENTRY)?;
    let identity = inv.caller_identity()?;
    p.private
        .set(&identity, &input.key, input.value.clone().into_bytes())?;
    Ok(Output::text(input.value))
}

/// Handle CreateDocument command.
pub(crate) fn create_document(p: &Primitives, inv: &Invocation) -> Result<Output> {
    let doc: DocumentInput = read_transient(inv.transient(), DOCUMENT_ENTRY)?;
    let identity = inv.caller_identity()?;
    p.private
        .create_document(&identity, &doc.document_id, doc.content.into_bytes())?;
    Ok(Output::text(doc.document_id))
}

/// Handle PrivateHash command.
pub(crate) fn private_hash(p: &Primitives, inv: &Invocation) -> Result<Output> {
    let req: HashRequest = read_transient(inv.transient(), HASH_REQUEST_ENTRY)?;
    let identity = inv.caller_identity()?;
    Ok(match p.private.hash(&identity, &req.key)? {
        PrivateRead::Own(digest) => Output::text(digest),
        PrivateRead::Partitioned(digests) => Output::Tagged(
            digests
                .into_iter()
                .map(|(c, d)| (c, d.into_bytes()))
                .collect(),
        ),
    })
}

/// Handle PrivatePut command.
pub(crate) fn put_row(
    p: &Primitives,
    inv: &Invocation,
    table: String,
    parts: Vec<String>,
    value: String,
) -> Result<Output> {
    let identity = inv.caller_identity()?;
    p.private
        .put_row(&identity, &table, &parts, value.into_bytes())?;
    Ok(Output::text(parts.last().cloned().unwrap_or_default()))
}

/// Handle PrivateGet command.
pub(crate) fn get_row(
    p: &Primitives,
    inv: &Invocation,
    table: String,
    parts: Vec<String>,
) -> Result<Output> {
    let identity = inv.caller_identity()?;
    Ok(read_output(p.private.get_row(&identity, &table, &parts)?))
}

/// Handle PrivateDelete command.
pub(crate) fn delete_row(
    p: &Primitives,
    inv: &Invocation,
    table: String,
    parts: Vec<String>,
) -> Result<Output> {
    let identity = inv.caller_identity()?;
    p.private.delete_row(&identity, &table, &parts)?;
    Ok(Output::text(parts.last().cloned().unwrap_or_default()))
}

/// Handle PrivateScan command.
pub(crate) fn scan(
    p: &Primitives,
    inv: &Invocation,
    table: String,
    leading: Vec<String>,
) -> Result<Output> {
    let identity = inv.caller_identity()?;
    // Single-field keys render the same either way
    let read = p
        .private
        .scan(&identity, &table, &leading, KeyRendering::Joined)?;
    Ok(match read {
        PrivateRead::Own(set) => Output::Rows {
            set,
            style: RecordStyle::Embedded,
        },
        PrivateRead::Partitioned(parts) => Output::Partitioned {
            result: PartitionedResult::new(parts),
            style: RecordStyle::Embedded,
        },
    })
}
