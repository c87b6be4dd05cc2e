//! Read intents
//!
//! A `ReadIntent` gathers everything a legacy read or scan asks for. The
//! compiler turns it into a predicate tree plus a row set.

use crate::successor::key_successor;
use bigtable_compat_core::{ColumnSelector, PredicateNode};
use serde::{Deserialize, Serialize};

// ============================================================================
// Row Ranges
// ============================================================================

/// Contiguous row-key interval `[start, end)`
///
/// An empty `start` begins at the first row; an empty `end` runs to the last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowRange {
    /// Inclusive start key
    pub start: Vec<u8>,
    /// Exclusive end key
    pub end: Vec<u8>,
}

impl RowRange {
    /// Range between two keys
    pub fn new(start: impl Into<Vec<u8>>, end: impl Into<Vec<u8>>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Every row in the table
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Every row whose key starts with `prefix`
    pub fn prefix(prefix: impl Into<Vec<u8>>) -> Self {
        let start = prefix.into();
        let end = key_successor(&start);
        Self { start, end }
    }

    /// True if there is no upper bound
    pub fn is_open_ended(&self) -> bool {
        self.end.is_empty()
    }

    /// Check whether a key falls in the range
    pub fn contains(&self, key: &[u8]) -> bool {
        key >= self.start.as_slice() && (self.end.is_empty() || key < self.end.as_slice())
    }
}

/// Rows a read touches
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowSet {
    /// Explicit keys, in caller order
    Keys(Vec<Vec<u8>>),
    /// A key range
    Range(RowRange),
}

// ============================================================================
// Intent
// ============================================================================

/// Which composition order the compiler uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadShape {
    /// Row reads and scans: filter, columns, row keys, versions, timestamp
    #[default]
    Rows,
    /// Version history of a single cell: family, qualifier, versions,
    /// timestamp in one flat chain
    CellHistory,
}

/// Aggregate input to the filter compiler
///
/// Every field is optional. An empty `columns` list selects every column.
/// `row_keys: Some(vec![])` is an error at compile time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadIntent {
    /// Columns to return
    pub columns: Vec<ColumnSelector>,
    /// Newest N cells per column
    pub versions: Option<u32>,
    /// Timestamp cutoff in milliseconds since the epoch
    pub timestamp: Option<i64>,
    /// Explicit rows to read
    pub row_keys: Option<Vec<Vec<u8>>>,
    /// Row key range to scan
    pub row_range: Option<RowRange>,
    /// Caller-supplied predicate ANDed ahead of generated clauses
    pub filter: Option<PredicateNode>,
    /// Maximum number of rows to return
    pub limit: Option<u64>,
    /// Composition order
    pub shape: ReadShape,
}

impl ReadIntent {
    /// Empty intent
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column selection
    pub fn with_columns(mut self, columns: Vec<ColumnSelector>) -> Self {
        self.columns = columns;
        self
    }

    /// Add a single column selector
    pub fn with_column(mut self, column: ColumnSelector) -> Self {
        self.columns.push(column);
        self
    }

    /// Set the version cap
    pub fn with_versions(mut self, versions: u32) -> Self {
        self.versions = Some(versions);
        self
    }

    /// Set the timestamp cutoff
    pub fn with_timestamp(mut self, millis: i64) -> Self {
        self.timestamp = Some(millis);
        self
    }

    /// Set explicit row keys
    pub fn with_row_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Vec<u8>>,
    {
        self.row_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Set the row range
    pub fn with_row_range(mut self, range: RowRange) -> Self {
        self.row_range = Some(range);
        self
    }

    /// Set the caller-supplied predicate
    pub fn with_filter(mut self, filter: PredicateNode) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set the row limit
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the composition order
    pub fn with_shape(mut self, shape: ReadShape) -> Self {
        self.shape = shape;
        self
    }

    /// True if any filter clause is present
    pub fn has_clauses(&self) -> bool {
        !self.columns.is_empty()
            || self.versions.is_some()
            || self.timestamp.is_some()
            || self.row_keys.is_some()
            || self.filter.is_some()
    }
}
