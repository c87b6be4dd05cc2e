//! Client configuration via TOML
//!
//! One file configures how legacy timestamp cutoffs are compiled and how
//! long-running operations are polled. Every key is optional.

use bigtable_compat_core::{CompatError, CompatResult};
use bigtable_compat_filter::{FilterCompiler, TimestampSemantics};
use bigtable_compat_operations::{
    OperationPoller, PollConfig, DEFAULT_BASE_WAIT, DEFAULT_MAX_RETRIES, DEFAULT_RPC_TIMEOUT,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Conventional config file name
pub const CONFIG_FILE_NAME: &str = "bigtable-compat.toml";

/// `[filter]` section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSection {
    /// `"inclusive"` (default) or `"exclusive"`
    #[serde(default)]
    pub timestamp_semantics: TimestampSemantics,
}

/// `[operations]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationsSection {
    /// Status queries before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// First backoff wait in milliseconds
    #[serde(default = "default_base_wait_ms")]
    pub base_wait_ms: u64,
    /// Per-call status query timeout in seconds
    #[serde(default = "default_rpc_timeout_secs")]
    pub rpc_timeout_secs: u64,
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_base_wait_ms() -> u64 {
    DEFAULT_BASE_WAIT.as_millis() as u64
}

fn default_rpc_timeout_secs() -> u64 {
    DEFAULT_RPC_TIMEOUT.as_secs()
}

impl Default for OperationsSection {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_wait_ms: default_base_wait_ms(),
            rpc_timeout_secs: default_rpc_timeout_secs(),
        }
    }
}

/// Client configuration loaded from `bigtable-compat.toml`.
///
/// # Example
///
/// ```toml
/// [filter]
/// timestamp_semantics = "inclusive"
///
/// [operations]
/// max_retries = 10
/// base_wait_ms = 1000
/// rpc_timeout_secs = 10
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatConfig {
    /// Filter compilation settings
    #[serde(default)]
    pub filter: FilterSection,
    /// Operation polling settings
    #[serde(default)]
    pub operations: OperationsSection,
}

impl CompatConfig {
    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the text is not valid TOML or a value is not
    /// recognised (e.g. an unknown timestamp semantics).
    pub fn from_toml_str(content: &str) -> CompatResult<Self> {
        toml::from_str(content)
            .map_err(|e| CompatError::config(format!("Failed to parse config: {}", e)))
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> CompatResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CompatError::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&content).map_err(|e| {
            CompatError::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# bigtable-compat client configuration

[filter]
# How a legacy timestamp cutoff becomes the service's exclusive upper bound:
#   "inclusive" = cells written at the cutoff millisecond are returned
#   "exclusive" = the cutoff itself is the exclusive bound
timestamp_semantics = "inclusive"

[operations]
# Status queries before a long-running operation is declared timed out
max_retries = 10
# First wait between status queries; doubles after every "not done"
base_wait_ms = 1000
# Timeout for each status query
rpc_timeout_secs = 10
"#
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> CompatResult<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                CompatError::config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Filter compiler for these settings
    pub fn filter_compiler(&self) -> FilterCompiler {
        FilterCompiler::with_timestamp_semantics(self.filter.timestamp_semantics)
    }

    /// Poll configuration for these settings
    pub fn poll_config(&self) -> PollConfig {
        PollConfig::new()
            .with_max_retries(self.operations.max_retries)
            .with_base_wait(Duration::from_millis(self.operations.base_wait_ms))
            .with_rpc_timeout(Duration::from_secs(self.operations.rpc_timeout_secs))
    }

    /// Operation poller for these settings
    pub fn operation_poller(&self) -> OperationPoller {
        OperationPoller::new(self.poll_config())
    }
}
