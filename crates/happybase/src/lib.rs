//! Legacy row/column table API
//!
//! Exposes the read calls and helpers of the legacy client on top of the
//! filter compiler:
//! - Table: `row`, `rows`, `cells` and `scan` read planning
//! - ScanOptions: Key range / prefix / column / limit arguments for scans
//! - describe_families / family_rules: Flat GC policy view of column families
//! - make_row / make_ordered_row: Thrift-only helpers, reported as unsupported

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod families;
pub mod legacy;
pub mod table;

pub use families::{describe_families, family_rules};
pub use legacy::{make_ordered_row, make_row, LegacyRow};
pub use table::{ScanOptions, Table};
