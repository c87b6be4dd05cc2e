//! Core types for the compatibility layer
//!
//! This crate defines the foundational types shared by the filter compiler,
//! the operation poller and the legacy table facade:
//! - CompatError: Error taxonomy
//! - ColumnSelector: `fam` / `fam:col` column names
//! - PredicateNode: Leaf / Chain / Union filter tree
//! - TimestampRange: Half-open cell timestamp interval
//! - GcRule / GcPolicy: Column family GC rules and their flat legacy form

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod column;
pub mod error;
pub mod gc;
pub mod predicate;

pub use column::{ColumnSelector, COLUMN_SEPARATOR};
pub use error::{CompatError, CompatResult};
pub use gc::{
    gc_rule_from_dict, gc_rule_to_dict, GcPolicy, GcPolicyView, GcRule, MAX_VERSIONS_KEY,
    TIME_TO_LIVE_KEY,
};
pub use predicate::{datetime_from_millis, LeafPredicate, PredicateNode, TimestampRange};
