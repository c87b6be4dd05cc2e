//! Predicate trees
//!
//! The storage service selects cells with a tree of filters: leaves test a
//! single property of a cell, `Chain` requires every child to hold (AND, in
//! listed order), and `Union` keeps cells matched by any child (OR).
//!
//! ## Invariants
//!
//! - `Chain` and `Union` always have at least one child. The `chain` and
//!   `union` constructors refuse empty input and unwrap single children.
//! - Trees are plain values: equal inputs build structurally equal trees.

use crate::error::{CompatError, CompatResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Timestamp Range
// ============================================================================

/// Half-open cell timestamp interval `[start, end)`
///
/// A missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimestampRange {
    /// Inclusive lower bound
    pub start: Option<DateTime<Utc>>,
    /// Exclusive upper bound
    pub end: Option<DateTime<Utc>>,
}

impl TimestampRange {
    /// Range with only an exclusive upper bound
    pub fn until(end: DateTime<Utc>) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// Range from millisecond bounds since the epoch
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if a bound is outside the representable
    /// date range.
    pub fn from_millis(start: Option<i64>, end: Option<i64>) -> CompatResult<Self> {
        Ok(Self {
            start: start.map(datetime_from_millis).transpose()?,
            end: end.map(datetime_from_millis).transpose()?,
        })
    }

    /// Lower bound in microseconds since the epoch
    pub fn start_micros(&self) -> Option<i64> {
        self.start.map(|ts| ts.timestamp_micros())
    }

    /// Upper bound in microseconds since the epoch
    pub fn end_micros(&self) -> Option<i64> {
        self.end.map(|ts| ts.timestamp_micros())
    }
}

/// Convert milliseconds since the epoch to a UTC datetime
pub fn datetime_from_millis(millis: i64) -> CompatResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
        CompatError::invalid_argument(format!(
            "timestamp {}ms is outside the supported range",
            millis
        ))
    })
}

// ============================================================================
// Leaves
// ============================================================================

/// A single-property cell test
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeafPredicate {
    /// Cell belongs to the named column family
    FamilyNameMatch(String),
    /// Cell qualifier matches
    QualifierMatch(Vec<u8>),
    /// Cell belongs to the row with this key
    RowKeyMatch(Vec<u8>),
    /// Keep only the newest N cells per column per row
    VersionLimit(u32),
    /// Cell timestamp falls within the range
    TimestampRange(TimestampRange),
}

// ============================================================================
// Tree
// ============================================================================

/// Filter tree consumed by the request layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredicateNode {
    /// Single cell test
    Leaf(LeafPredicate),
    /// Logical AND over children, evaluated in order
    Chain(Vec<PredicateNode>),
    /// Logical OR over children
    Union(Vec<PredicateNode>),
}

impl PredicateNode {
    /// Family name leaf
    pub fn family(name: impl Into<String>) -> Self {
        LeafPredicate::FamilyNameMatch(name.into()).into()
    }

    /// Qualifier leaf
    pub fn qualifier(qualifier: impl Into<Vec<u8>>) -> Self {
        LeafPredicate::QualifierMatch(qualifier.into()).into()
    }

    /// Row key leaf
    pub fn row_key(key: impl Into<Vec<u8>>) -> Self {
        LeafPredicate::RowKeyMatch(key.into()).into()
    }

    /// Version cap leaf
    pub fn version_limit(versions: u32) -> Self {
        LeafPredicate::VersionLimit(versions).into()
    }

    /// Timestamp range leaf
    pub fn timestamp_range(range: TimestampRange) -> Self {
        LeafPredicate::TimestampRange(range).into()
    }

    /// AND the children together.
    ///
    /// A single child is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if `children` is empty.
    pub fn chain(mut children: Vec<PredicateNode>) -> CompatResult<Self> {
        match children.len() {
            0 => Err(CompatError::invalid_request(
                "cannot build a chain with no predicates",
            )),
            1 => Ok(children.remove(0)),
            _ => Ok(PredicateNode::Chain(children)),
        }
    }

    /// OR the children together.
    ///
    /// A single child is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if `children` is empty.
    pub fn union(mut children: Vec<PredicateNode>) -> CompatResult<Self> {
        match children.len() {
            0 => Err(CompatError::invalid_request(
                "cannot build a union with no predicates",
            )),
            1 => Ok(children.remove(0)),
            _ => Ok(PredicateNode::Union(children)),
        }
    }

    /// True for leaf nodes
    pub fn is_leaf(&self) -> bool {
        matches!(self, PredicateNode::Leaf(_))
    }

    /// Direct children of a composite; empty for leaves
    pub fn children(&self) -> &[PredicateNode] {
        match self {
            PredicateNode::Leaf(_) => &[],
            PredicateNode::Chain(children) | PredicateNode::Union(children) => children,
        }
    }

    /// Total number of leaves in the tree
    pub fn leaf_count(&self) -> usize {
        match self {
            PredicateNode::Leaf(_) => 1,
            PredicateNode::Chain(children) | PredicateNode::Union(children) => {
                children.iter().map(PredicateNode::leaf_count).sum()
            }
        }
    }

    /// Check the non-empty composite invariant over the whole tree
    pub fn is_well_formed(&self) -> bool {
        if self.is_leaf() {
            return true;
        }
        let children = self.children();
        !children.is_empty() && children.iter().all(PredicateNode::is_well_formed)
    }
}

impl From<LeafPredicate> for PredicateNode {
    fn from(leaf: LeafPredicate) -> Self {
        PredicateNode::Leaf(leaf)
    }
}
