//! Long-running cluster operations
//!
//! Cluster create/update/undelete calls return immediately with an operation
//! handle; completion is observed by polling. This crate provides:
//! - ClusterRef / parse_operation_name: Resource names for clusters and operations
//! - OperationHandle: Client-side record of one operation
//! - PollConfig: Retry cap, backoff base and per-call timeout
//! - OperationPoller: Exponential-backoff poll loop and one-shot check

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod handle;
pub mod names;
pub mod poller;

pub use config::{PollConfig, DEFAULT_BASE_WAIT, DEFAULT_MAX_RETRIES, DEFAULT_RPC_TIMEOUT};
pub use handle::{OperationHandle, OperationKind};
pub use names::{parse_operation_name, ClusterRef};
pub use poller::{OperationPoller, OperationStatus, Sleeper, StatusQuery, ThreadSleeper};
