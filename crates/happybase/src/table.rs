//! Legacy table read surface
//!
//! `Table` keeps the row-oriented read calls of the legacy API (`row`,
//! `rows`, `cells`, `scan`) and turns each into a `ReadPlan` for the request
//! layer. No I/O happens here.
//!
//! Row reads and scans return only the latest cell of each column, so every
//! plan except `cells` carries a version cap of 1.

use bigtable_compat_core::{ColumnSelector, CompatError, CompatResult, PredicateNode};
use bigtable_compat_filter::{
    FilterCompiler, ReadIntent, ReadPlan, ReadShape, RowRange, RowSet,
};
use std::fmt;
use tracing::debug;

/// Version cap used by row reads and scans
const LATEST_ONLY: u32 = 1;

// ============================================================================
// Scan Options
// ============================================================================

/// Arguments to `Table::scan`
///
/// There are no batching or caching knobs: the service streams rows itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// First row key to return (inclusive)
    pub row_start: Option<Vec<u8>>,
    /// Row key to stop at (exclusive)
    pub row_stop: Option<Vec<u8>>,
    /// Only return rows whose key has this prefix
    pub row_prefix: Option<Vec<u8>>,
    /// Legacy column names (`fam`, `fam:`, `fam:col`)
    pub columns: Vec<String>,
    /// Timestamp cutoff in milliseconds since the epoch
    pub timestamp: Option<i64>,
    /// Extra predicate ANDed ahead of the generated ones
    pub filter: Option<PredicateNode>,
    /// Maximum number of rows
    pub limit: Option<u64>,
}

impl ScanOptions {
    /// Scan every row
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan rows with a key prefix
    pub fn prefix(prefix: impl Into<Vec<u8>>) -> Self {
        Self {
            row_prefix: Some(prefix.into()),
            ..Self::default()
        }
    }

    /// Scan rows in `[start, stop)`
    pub fn range(start: impl Into<Vec<u8>>, stop: impl Into<Vec<u8>>) -> Self {
        Self {
            row_start: Some(start.into()),
            row_stop: Some(stop.into()),
            ..Self::default()
        }
    }

    fn row_range(&self) -> CompatResult<RowRange> {
        match (&self.row_prefix, &self.row_start, &self.row_stop) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(CompatError::invalid_request(
                "row_prefix cannot be combined with row_start or row_stop",
            )),
            (Some(prefix), None, None) => Ok(RowRange::prefix(prefix.clone())),
            (None, start, stop) => Ok(RowRange::new(
                start.clone().unwrap_or_default(),
                stop.clone().unwrap_or_default(),
            )),
        }
    }
}

// ============================================================================
// Table
// ============================================================================

/// A table addressed through the legacy API
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    compiler: FilterCompiler,
}

impl Table {
    /// Create a table handle
    pub fn new(name: impl Into<String>, compiler: FilterCompiler) -> Self {
        Self {
            name: name.into(),
            compiler,
        }
    }

    /// Table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Compiler used for every read on this table
    pub fn compiler(&self) -> &FilterCompiler {
        &self.compiler
    }

    /// Plan a read of the latest cells in one row.
    ///
    /// An empty `columns` slice reads every column. With a `timestamp`,
    /// "latest" means latest up to that cutoff.
    pub fn row(
        &self,
        row: impl Into<Vec<u8>>,
        columns: &[&str],
        timestamp: Option<i64>,
    ) -> CompatResult<ReadPlan> {
        let plan = self.compiler.plan(&latest_cells_intent(
            vec![row.into()],
            columns,
            timestamp,
        )?)?;
        debug!(table = %self.name, "Planned single row read");
        Ok(plan)
    }

    /// Plan a read of the latest cells in several rows.
    ///
    /// Returns `Ok(None)` for an empty key list: there is nothing to read.
    pub fn rows<I, K>(
        &self,
        rows: I,
        columns: &[&str],
        timestamp: Option<i64>,
    ) -> CompatResult<Option<ReadPlan>>
    where
        I: IntoIterator<Item = K>,
        K: Into<Vec<u8>>,
    {
        let keys: Vec<Vec<u8>> = rows.into_iter().map(Into::into).collect();
        if keys.is_empty() {
            return Ok(None);
        }
        let count = keys.len();
        let plan = self
            .compiler
            .plan(&latest_cells_intent(keys, columns, timestamp)?)?;
        debug!(table = %self.name, rows = count, "Planned multi row read");
        Ok(Some(plan))
    }

    /// Plan a read of several versions of one cell.
    ///
    /// `column` must be of the form `fam:col`. Without `versions`, every
    /// version is returned.
    pub fn cells(
        &self,
        row: impl Into<Vec<u8>>,
        column: &str,
        versions: Option<u32>,
        timestamp: Option<i64>,
    ) -> CompatResult<ReadPlan> {
        let mut intent = ReadIntent::new()
            .with_shape(ReadShape::CellHistory)
            .with_column(ColumnSelector::parse_qualified(column)?);
        intent.versions = versions;
        intent.timestamp = timestamp;

        let filter = self.compiler.compile(&intent)?;
        debug!(table = %self.name, column, "Planned cell history read");
        Ok(ReadPlan {
            rows: RowSet::Keys(vec![row.into()]),
            filter: Some(filter),
            limit: None,
        })
    }

    /// Plan a scan over a key range or prefix.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if `row_prefix` is combined with `row_start` or
    ///   `row_stop`
    /// - `InvalidArgument` for a zero limit or a malformed column name
    pub fn scan(&self, options: &ScanOptions) -> CompatResult<ReadPlan> {
        let mut intent = ReadIntent::new()
            .with_row_range(options.row_range()?)
            .with_columns(ColumnSelector::parse_all(&options.columns)?)
            .with_versions(LATEST_ONLY);
        intent.timestamp = options.timestamp;
        intent.filter = options.filter.clone();
        intent.limit = options.limit;

        let plan = self.compiler.plan(&intent)?;
        debug!(table = %self.name, limit = ?options.limit, "Planned scan");
        Ok(plan)
    }

    /// Region layout of the table.
    ///
    /// The service does not expose how a table is split, so this always
    /// returns `Unsupported`.
    pub fn regions(&self) -> CompatResult<Vec<RowRange>> {
        Err(CompatError::unsupported(
            "the service has no concept of splitting a table into regions",
        ))
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Table name={:?}>", self.name)
    }
}

fn latest_cells_intent(
    keys: Vec<Vec<u8>>,
    columns: &[&str],
    timestamp: Option<i64>,
) -> CompatResult<ReadIntent> {
    let mut intent = ReadIntent::new()
        .with_columns(ColumnSelector::parse_all(columns)?)
        .with_row_keys(keys)
        .with_versions(LATEST_ONLY);
    intent.timestamp = timestamp;
    Ok(intent)
}
