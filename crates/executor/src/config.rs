//! Ledger configuration via `ledgerkit.toml`
//!
//! The only deployment-specific setting is the collection routing table:
//! which identity owns which private collection, and which identity (if any)
//! audits across all of them. On first start a commented default file is
//! written; edit it and restart to change routing.

use std::path::Path;

use ledgerkit_core::{Error, Result};
use ledgerkit_primitives::{CollectionRouter, RouterConfig};
use serde::{Deserialize, Serialize};

/// Config file name
pub const CONFIG_FILE_NAME: &str = "ledgerkit.toml";

/// Ledger configuration loaded from `ledgerkit.toml`.
///
/// # Example
///
/// ```toml
/// aggregate_identity = "coffeeauditMSP"
///
/// [[collections]]
/// identity = "bobscoffeeMSP"
/// collection = "BobsCoffeeCollection"
///
/// [[collections]]
/// identity = "charliescoffeeMSP"
/// collection = "CharliesCoffeeCollection"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Collection routing table, stored at the top level of the file
    #[serde(flatten)]
    pub routing: RouterConfig,
}

impl LedgerConfig {
    /// Wrap a routing table
    pub fn new(routing: RouterConfig) -> Self {
        Self { routing }
    }

    /// Router table described by this config
    pub fn router_config(&self) -> &RouterConfig {
        &self.routing
    }

    /// Build and validate the router
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an inconsistent routing table.
    pub fn router(&self) -> Result<CollectionRouter> {
        CollectionRouter::new(self.routing.clone())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# ledgerkit configuration
#
# Private data collections are reached only through the caller's identity.
# Each identity below owns exactly one collection and may write only there.
# Several identities may share a collection.
#
# [[collections]]
# identity = "bobscoffeeMSP"
# collection = "BobsCoffeeCollection"
#
# [[collections]]
# identity = "charliescoffeeMSP"
# collection = "CharliesCoffeeCollection"

# Optional identity that reads every collection (results tagged per
# collection) and is never permitted to write.
# aggregate_identity = "coffeeauditMSP"
"#
    }

    /// Parse and validate config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the text does not parse, or `InvalidArgument` if
    /// the routing table is inconsistent.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: LedgerConfig = toml::from_str(content)
            .map_err(|e| Error::config(format!("failed to parse config: {}", e)))?;
        // Validate the routing table eagerly
        config.router()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config { reason } => {
                Error::config(format!("{} ({})", reason, path.display()))
            }
            other => other,
        })
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::config(format!(
                    "failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::config(format!(
                "failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
