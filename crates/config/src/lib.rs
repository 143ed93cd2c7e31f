//! Tokencount configuration structures to map the tokencount.toml configuration.

#![deny(missing_docs)]

mod cli;
mod estimator;
mod loader;

use std::path::Path;

pub use cli::CliConfig;
pub use estimator::{EstimatorConfig, ToolAccountingMode, ToolCostsConfig};
use serde::Deserialize;

/// Main configuration structure for tokencount.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Prompt token estimator settings.
    #[serde(default)]
    pub estimator: EstimatorConfig,
    /// Command line settings.
    #[serde(default)]
    pub cli: CliConfig,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
        loader::load(path)
    }

    /// Validates values the type system cannot express.
    pub fn validate(&self) -> anyhow::Result<()> {
        loader::validate(self)
    }
}
