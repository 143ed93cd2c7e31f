//! Command line configuration structures.

use serde::Deserialize;

/// Settings for the `tokencount` command line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Model used when neither the command line nor the request names one.
    pub default_model: Option<String>,
}
