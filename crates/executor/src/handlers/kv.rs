//! KV command handlers.
//!
//! Plain keys in public state.

use ledgerkit_core::{Result, Space};
use ledgerkit_primitives::transient::{read_transient, KeyValueInput, KEYVALUE_ENTRY};

use crate::executor::Primitives;
use crate::{Invocation, Output};

/// Handle Set command.
pub(crate) fn set(p: &Primitives, key: String, value: String) -> Result<Output> {
    p.kv.set(&Space::Public, &key, value.clone().into_bytes())?;
    Ok(Output::text(value))
}

/// Handle Get command.
pub(crate) fn get(p: &Primitives, key: String) -> Result<Output> {
    Ok(Output::Value(p.kv.get(&Space::Public, &key)?))
}

/// Handle Delete command.
pub(crate) fn delete(p: &Primitives, key: String) -> Result<Output> {
    p.kv.delete(&Space::Public, &key)?;
    Ok(Output::text(key))
}

/// Handle History command.
pub(crate) fn history(p: &Primitives, key: String) -> Result<Output> {
    let entries = p.kv.history(&key)?.collect::<Result<Vec<_>>>()?;
    Ok(Output::History(entries))
}

/// Handle SetTransient command.
pub(crate) fn set_transient(p: &Primitives, inv: &Invocation) -> Result<Output> {
    let input: KeyValueInput = read_transient(inv.transient(), KEYVALUE_ENTRY)?;
    p.kv.set(&Space::Public, &input.key, input.value.clone().into_bytes())?;
    Ok(Output::text(input.value))
}
