//! Read plans handed to the request layer

use crate::intent::{RowRange, RowSet};
use bigtable_compat_core::PredicateNode;
use serde::{Deserialize, Serialize};

/// Everything the request layer needs to issue one read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadPlan {
    /// Rows to read
    pub rows: RowSet,
    /// Cell filter; `None` returns every cell of every selected row
    pub filter: Option<PredicateNode>,
    /// Maximum number of rows to return
    pub limit: Option<u64>,
}

impl ReadPlan {
    /// Explicit row keys, if the plan reads a key set
    pub fn row_keys(&self) -> Option<&[Vec<u8>]> {
        match &self.rows {
            RowSet::Keys(keys) => Some(keys),
            RowSet::Range(_) => None,
        }
    }

    /// Key range, if the plan scans a range
    pub fn row_range(&self) -> Option<&RowRange> {
        match &self.rows {
            RowSet::Keys(_) => None,
            RowSet::Range(range) => Some(range),
        }
    }

    /// True for an unfiltered, unlimited scan of the whole table
    pub fn is_full_table_scan(&self) -> bool {
        self.filter.is_none()
            && self.limit.is_none()
            && self.row_range() == Some(&RowRange::unbounded())
    }
}
