//! Filter compiler
//!
//! Translates a `ReadIntent` into the predicate tree the storage service
//! evaluates. Compilation is pure: the same intent always yields a
//! structurally identical tree, and a failure leaves nothing behind.
//!
//! ## Composition order
//!
//! `ReadShape::Rows` ANDs, in order:
//! 1. the caller-supplied predicate
//! 2. the column selection (a Union when more than one selector)
//! 3. the row-key selection (a Union when more than one key)
//! 4. the version cap
//! 5. the timestamp range
//!
//! `ReadShape::CellHistory` ANDs the family leaf, the qualifier leaf, the
//! version cap and the timestamp range in one flat chain.
//!
//! A chain with a single clause is returned as that clause.

use crate::intent::{ReadIntent, ReadShape, RowRange, RowSet};
use crate::plan::ReadPlan;
use bigtable_compat_core::{
    datetime_from_millis, ColumnSelector, CompatError, CompatResult, PredicateNode,
    TimestampRange,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// Timestamp Semantics
// ============================================================================

/// How a legacy timestamp cutoff maps onto the service's exclusive bound
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampSemantics {
    /// Cells at the cutoff millisecond are returned; the range ends at
    /// `cutoff + 1ms`
    #[default]
    Inclusive,
    /// The cutoff is already the exclusive upper bound
    Exclusive,
}

impl TimestampSemantics {
    /// Exclusive upper bound in milliseconds for a cutoff
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the adjusted bound overflows.
    pub fn upper_bound_millis(&self, cutoff: i64) -> CompatResult<i64> {
        match self {
            TimestampSemantics::Inclusive => cutoff.checked_add(1).ok_or_else(|| {
                CompatError::invalid_argument(format!(
                    "timestamp {} has no inclusive upper bound",
                    cutoff
                ))
            }),
            TimestampSemantics::Exclusive => Ok(cutoff),
        }
    }
}

// ============================================================================
// Compiler
// ============================================================================

/// Stateless intent-to-predicate translator
///
/// One compiler carries one timestamp semantics, so every call site sharing
/// a compiler agrees on how cutoffs are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCompiler {
    timestamp_semantics: TimestampSemantics,
}

impl FilterCompiler {
    /// Compiler with the default (inclusive) timestamp semantics
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiler with explicit timestamp semantics
    pub fn with_timestamp_semantics(timestamp_semantics: TimestampSemantics) -> Self {
        Self {
            timestamp_semantics,
        }
    }

    /// Timestamp semantics in effect
    pub fn timestamp_semantics(&self) -> TimestampSemantics {
        self.timestamp_semantics
    }

    /// Compile an intent into a predicate tree.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if the intent carries no filter clauses or an
    ///   empty row-key set
    /// - `InvalidArgument` for a zero version cap, an unrepresentable
    ///   timestamp, or a cell-history intent that does not name exactly one
    ///   `fam:col` column
    pub fn compile(&self, intent: &ReadIntent) -> CompatResult<PredicateNode> {
        if !intent.has_clauses() {
            return Err(CompatError::invalid_request("no filter clauses requested"));
        }
        if intent.versions == Some(0) {
            return Err(CompatError::invalid_argument(
                "version cap must be a positive integer",
            ));
        }

        let clauses = match intent.shape {
            ReadShape::Rows => self.row_clauses(intent)?,
            ReadShape::CellHistory => self.cell_history_clauses(intent)?,
        };

        debug!(
            shape = ?intent.shape,
            clauses = clauses.len(),
            "Compiled read intent"
        );
        PredicateNode::chain(clauses)
    }

    /// Compile an intent into a full read plan.
    ///
    /// Unlike `compile`, an intent without filter clauses is legal here: it
    /// produces a plan with no filter (a plain range scan).
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if both row keys and a row range are given
    /// - `InvalidArgument` for a zero limit
    /// - any error from `compile`
    pub fn plan(&self, intent: &ReadIntent) -> CompatResult<ReadPlan> {
        if intent.limit == Some(0) {
            return Err(CompatError::invalid_argument("limit must be positive"));
        }

        let rows = match (&intent.row_keys, &intent.row_range) {
            (Some(_), Some(_)) => {
                return Err(CompatError::invalid_request(
                    "row keys and a row range cannot be combined",
                ))
            }
            (Some(keys), None) => RowSet::Keys(keys.clone()),
            (None, Some(range)) => RowSet::Range(range.clone()),
            (None, None) => RowSet::Range(RowRange::unbounded()),
        };

        let filter = if intent.has_clauses() {
            Some(self.compile(intent)?)
        } else {
            None
        };

        Ok(ReadPlan {
            rows,
            filter,
            limit: intent.limit,
        })
    }

    fn row_clauses(&self, intent: &ReadIntent) -> CompatResult<Vec<PredicateNode>> {
        let mut clauses = Vec::with_capacity(5);

        if let Some(filter) = &intent.filter {
            clauses.push(filter.clone());
        }
        if !intent.columns.is_empty() {
            clauses.push(columns_predicate(&intent.columns)?);
        }
        if let Some(keys) = &intent.row_keys {
            clauses.push(row_keys_predicate(keys)?);
        }
        if let Some(versions) = intent.versions {
            clauses.push(PredicateNode::version_limit(versions));
        }
        if let Some(cutoff) = intent.timestamp {
            clauses.push(self.timestamp_predicate(cutoff)?);
        }

        Ok(clauses)
    }

    fn cell_history_clauses(&self, intent: &ReadIntent) -> CompatResult<Vec<PredicateNode>> {
        if intent.row_keys.is_some() || intent.filter.is_some() {
            return Err(CompatError::invalid_argument(
                "a cell history read takes only a column, versions and a timestamp",
            ));
        }

        let (family, qualifier) = match intent.columns.as_slice() {
            [ColumnSelector::Column { family, qualifier }] => (family, qualifier),
            _ => {
                return Err(CompatError::invalid_argument(
                    "a cell history read needs exactly one 'fam:col' column",
                ))
            }
        };

        let mut clauses = vec![
            PredicateNode::family(family.as_str()),
            PredicateNode::qualifier(qualifier.as_slice()),
        ];
        if let Some(versions) = intent.versions {
            clauses.push(PredicateNode::version_limit(versions));
        }
        if let Some(cutoff) = intent.timestamp {
            clauses.push(self.timestamp_predicate(cutoff)?);
        }

        Ok(clauses)
    }

    fn timestamp_predicate(&self, cutoff: i64) -> CompatResult<PredicateNode> {
        let end = self.timestamp_semantics.upper_bound_millis(cutoff)?;
        Ok(PredicateNode::timestamp_range(TimestampRange::until(
            datetime_from_millis(end)?,
        )))
    }
}

// ============================================================================
// Clause Builders
// ============================================================================

/// Predicate for a single column selector
///
/// A family selects with one leaf; a column ANDs the family and qualifier
/// leaves so both must hold on the same cell.
pub fn column_predicate(selector: &ColumnSelector) -> PredicateNode {
    match selector {
        ColumnSelector::Family(family) => PredicateNode::family(family.as_str()),
        ColumnSelector::Column { family, qualifier } => PredicateNode::Chain(vec![
            PredicateNode::family(family.as_str()),
            PredicateNode::qualifier(qualifier.as_slice()),
        ]),
    }
}

/// Predicate matching any of the selectors
///
/// # Errors
///
/// Returns `InvalidRequest` if `selectors` is empty.
pub fn columns_predicate(selectors: &[ColumnSelector]) -> CompatResult<PredicateNode> {
    PredicateNode::union(selectors.iter().map(column_predicate).collect())
}

/// Predicate matching any of the row keys
///
/// # Errors
///
/// Returns `InvalidRequest` if `keys` is empty.
pub fn row_keys_predicate(keys: &[Vec<u8>]) -> CompatResult<PredicateNode> {
    if keys.is_empty() {
        return Err(CompatError::invalid_request("row key set is empty"));
    }
    PredicateNode::union(
        keys.iter()
            .map(|key| PredicateNode::row_key(key.as_slice()))
            .collect(),
    )
}
