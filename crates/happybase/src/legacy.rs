//! Legacy helpers with no counterpart in the service
//!
//! The legacy Thrift client shaped rows from server-side cell maps. The
//! service returns cells in a different form, so these helpers exist only
//! to report that clearly.

use bigtable_compat_core::{CompatError, CompatResult};
use std::collections::BTreeMap;

/// Row as the legacy client returned it: column name to value
pub type LegacyRow = BTreeMap<String, Vec<u8>>;

const THRIFT_SHAPE_UNSUPPORTED: &str =
    "service output does not have the Thrift server's shape, so this helper cannot be provided";

/// Build a row from a Thrift cell map. Always `Unsupported`.
pub fn make_row<C>(_cell_map: &C, include_timestamp: bool) -> CompatResult<LegacyRow> {
    Err(CompatError::unsupported(format!(
        "make_row(include_timestamp={}): {}",
        include_timestamp, THRIFT_SHAPE_UNSUPPORTED
    )))
}

/// Build a row from sorted Thrift columns. Always `Unsupported`.
pub fn make_ordered_row<C>(
    _sorted_columns: &C,
    include_timestamp: bool,
) -> CompatResult<LegacyRow> {
    Err(CompatError::unsupported(format!(
        "make_ordered_row(include_timestamp={}): {}",
        include_timestamp, THRIFT_SHAPE_UNSUPPORTED
    )))
}
