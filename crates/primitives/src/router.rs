//! Collection router
//!
//! Maps a caller identity to the private-data collection it owns. The mapping
//! is static and many-to-one. One optional aggregate identity may read every
//! collection but may never write.
//!
//! ## Fan-out
//!
//! Aggregate reads run the single-collection query once per distinct
//! collection, in configured order, and tag each sub-result with the
//! collection name. See [`CollectionRouter::fan_out`].

use std::collections::HashSet;

use ledgerkit_core::{CollectionName, Error, Result, Space};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One identity → collection mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRoute {
    /// Caller identity (e.g. a membership service id)
    pub identity: String,
    /// Collection that identity owns
    pub collection: String,
}

impl CollectionRoute {
    /// Convenience constructor
    pub fn new(identity: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            collection: collection.into(),
        }
    }
}

/// Static router table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Identity that reads across every collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate_identity: Option<String>,
    /// Concrete identity mappings, in fan-out order
    #[serde(default)]
    pub collections: Vec<CollectionRoute>,
}

/// Outcome of resolving an identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The identity owns exactly this collection
    Own(CollectionName),
    /// The identity reads across every collection
    Aggregate,
}

/// Validated router
#[derive(Debug, Clone)]
pub struct CollectionRouter {
    routes: Vec<(String, CollectionName)>,
    collections: Vec<CollectionName>,
    aggregate: Option<String>,
}

impl CollectionRouter {
    /// Validate `config` and build the router
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when an identity or collection name is empty,
    /// an identity is listed twice, or the aggregate identity is also listed
    /// as a concrete identity.
    pub fn new(config: RouterConfig) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut routes = Vec::with_capacity(config.collections.len());
        let mut collections: Vec<CollectionName> = Vec::new();

        for route in config.collections {
            if route.identity.is_empty() {
                return Err(Error::invalid_argument("router identity must not be empty"));
            }
            if route.collection.is_empty() {
                return Err(Error::invalid_argument(format!(
                    "collection for identity '{}' must not be empty",
                    route.identity
                )));
            }
            if config.aggregate_identity.as_deref() == Some(route.identity.as_str()) {
                return Err(Error::invalid_argument(format!(
                    "aggregate identity '{}' cannot own a collection",
                    route.identity
                )));
            }
            if !seen.insert(route.identity.clone()) {
                return Err(Error::invalid_argument(format!(
                    "identity '{}' is listed more than once",
                    route.identity
                )));
            }

            let name = CollectionName::new(route.collection);
            if !collections.contains(&name) {
                collections.push(name.clone());
            }
            routes.push((route.identity, name));
        }

        if let Some(agg) = &config.aggregate_identity {
            if agg.is_empty() {
                return Err(Error::invalid_argument("aggregate identity must not be empty"));
            }
        }

        Ok(Self {
            routes,
            collections,
            aggregate: config.aggregate_identity,
        })
    }

    /// Resolve an identity
    ///
    /// # Errors
    ///
    /// Returns `UnknownIdentity` for identities not in the table.
    pub fn resolve(&self, identity: &str) -> Result<Route> {
        if self.aggregate.as_deref() == Some(identity) {
            return Ok(Route::Aggregate);
        }
        self.routes
            .iter()
            .find(|(id, _)| id == identity)
            .map(|(_, c)| Route::Own(c.clone()))
            .ok_or_else(|| Error::UnknownIdentity {
                identity: identity.to_string(),
            })
    }

    /// The one space `identity` may write to
    ///
    /// # Errors
    ///
    /// Returns `UnknownIdentity` for unknown identities and
    /// `WriteNotPermitted` for the aggregate identity.
    pub fn writable_space(&self, identity: &str) -> Result<Space> {
        match self.resolve(identity)? {
            Route::Own(c) => Ok(Space::Collection(c)),
            Route::Aggregate => Err(Error::WriteNotPermitted {
                identity: identity.to_string(),
            }),
        }
    }

    /// Distinct collections, in configured order
    pub fn collections(&self) -> &[CollectionName] {
        &self.collections
    }

    /// The configured aggregate identity, if any
    pub fn aggregate_identity(&self) -> Option<&str> {
        self.aggregate.as_deref()
    }

    /// Run `query` against every collection `identity` may read
    ///
    /// A concrete identity yields exactly one partition. The aggregate
    /// identity yields one partition per collection, in configured order. The
    /// first error from `query` aborts the fan-out.
    pub fn fan_out<T, F>(&self, identity: &str, mut query: F) -> Result<Vec<(CollectionName, T)>>
    where
        F: FnMut(&Space) -> Result<T>,
    {
        let targets: Vec<CollectionName> = match self.resolve(identity)? {
            Route::Own(c) => vec![c],
            Route::Aggregate => self.collections.clone(),
        };
        debug!(target: "ledgerkit::router", identity, partitions = targets.len(), "fan out");

        targets
            .into_iter()
            .map(|c| {
                let space = Space::Collection(c.clone());
                query(&space).map(|out| (c, out))
            })
            .collect()
    }
}
