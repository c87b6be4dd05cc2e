//! bigtable-compat - legacy row/column access over a predicate-filter API
//!
//! Callers keep the legacy access pattern (latest cell per column, byte-string
//! row keys, prefix and range scans) while the service only understands
//! predicate trees and asynchronous, poll-based cluster operations.
//!
//! # Quick Start
//!
//! ```ignore
//! use bigtable_compat::{CompatConfig, ScanOptions, Table};
//!
//! let config = CompatConfig::from_file(Path::new("bigtable-compat.toml"))?;
//! let table = Table::new("events", config.filter_compiler());
//!
//! // Latest cells of two columns in one row
//! let plan = table.row("user#42", &["profile", "stats:visits"], None)?;
//!
//! // Prefix scan
//! let plan = table.scan(&ScanOptions::prefix("user#"))?;
//! ```
//!
//! # Architecture
//!
//! - `bigtable-compat-core`: errors, column selectors, predicate trees, GC rules
//! - `bigtable-compat-filter`: filter compiler, key successor, read plans
//! - `bigtable-compat-operations`: operation handles and the backoff poller
//! - `bigtable-compat-happybase`: legacy table read surface

pub mod config;
pub mod logging;

pub use config::{CompatConfig, FilterSection, OperationsSection, CONFIG_FILE_NAME};
pub use logging::init_tracing;

pub use bigtable_compat_core::*;
pub use bigtable_compat_filter::*;
pub use bigtable_compat_happybase::*;
pub use bigtable_compat_operations::*;
