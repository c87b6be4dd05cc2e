//! Read-intent compilation
//!
//! Turns legacy read parameters (columns, versions, timestamp cutoffs, row
//! keys, key prefixes) into the predicate trees and row sets the storage
//! service accepts.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compiler;
pub mod intent;
pub mod plan;
pub mod successor;

pub use compiler::{
    column_predicate, columns_predicate, row_keys_predicate, FilterCompiler, TimestampSemantics,
};
pub use intent::{ReadIntent, ReadShape, RowRange, RowSet};
pub use plan::ReadPlan;
pub use successor::key_successor;
