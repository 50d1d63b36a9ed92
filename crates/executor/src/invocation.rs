//! Per-invocation context
//!
//! An [`Invocation`] carries what the dispatcher knows about one call besides
//! its function name and arguments: the transaction id (for logging), the
//! transient inputs, and how to resolve the caller's identity.

use ledgerkit_core::{
    Error, FixedIdentity, IdentitySource, Result, TransientMap, TransientSource,
};

/// Context of one invocation
pub struct Invocation {
    tx_id: String,
    transient: Box<dyn TransientSource>,
    identity: Option<Box<dyn IdentitySource>>,
}

impl Invocation {
    /// Anonymous invocation with no transient inputs
    pub fn new(tx_id: impl Into<String>) -> Self {
        Self {
            tx_id: tx_id.into(),
            transient: Box::new(TransientMap::new()),
            identity: None,
        }
    }

    /// Resolve the caller through `source`
    pub fn with_identity(mut self, source: impl IdentitySource + 'static) -> Self {
        self.identity = Some(Box::new(source));
        self
    }

    /// Shorthand for a fixed caller identity
    pub fn as_caller(self, identity: impl Into<String>) -> Self {
        self.with_identity(FixedIdentity(identity.into()))
    }

    /// Read transient inputs from `source`
    pub fn with_transient(mut self, source: impl TransientSource + 'static) -> Self {
        self.transient = Box::new(source);
        self
    }

    /// Transaction id
    pub fn tx_id(&self) -> &str {
        &self.tx_id
    }

    /// Transient input source
    pub fn transient(&self) -> &dyn TransientSource {
        self.transient.as_ref()
    }

    /// Resolve the caller's identity
    ///
    /// # Errors
    ///
    /// Returns `UnknownIdentity` when no identity source is attached or the
    /// source fails.
    pub fn caller_identity(&self) -> Result<String> {
        let source = self.identity.as_ref().ok_or_else(|| Error::UnknownIdentity {
            identity: String::new(),
        })?;
        source.caller_identity().map_err(|e| match e {
            Error::UnknownIdentity { .. } => e,
            other => Error::UnknownIdentity {
                identity: format!("<unresolved: {}>", other),
            },
        })
    }
}

impl std::fmt::Debug for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation")
            .field("tx_id", &self.tx_id)
            .field("has_identity", &self.identity.is_some())
            .finish()
    }
}
