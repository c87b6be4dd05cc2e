//! Long-running operation handles
//!
//! A handle is created when a mutating cluster RPC reports an operation and
//! is never recreated. Only the poller flips `completed`, exactly once.

use crate::names::{parse_operation_name, ClusterRef};
use bigtable_compat_core::CompatResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of cluster mutation an operation tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Cluster creation
    Create,
    /// Cluster update
    Update,
    /// Cluster undelete
    Undelete,
}

impl OperationKind {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Create => "create",
            OperationKind::Update => "update",
            OperationKind::Undelete => "undelete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Client-side view of a long-running operation
///
/// Only the poller marks a handle complete, at most once.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct OperationHandle {
    kind: OperationKind,
    operation_id: u64,
    started_at: DateTime<Utc>,
    cluster: ClusterRef,
    completed: bool,
}

impl OperationHandle {
    /// Create a handle for a freshly reported operation
    pub fn new(
        kind: OperationKind,
        operation_id: u64,
        started_at: DateTime<Utc>,
        cluster: ClusterRef,
    ) -> Self {
        Self {
            kind,
            operation_id,
            started_at,
            cluster,
            completed: false,
        }
    }

    /// Create a handle from the operation name returned by the service
    ///
    /// # Errors
    ///
    /// Returns `InvalidResourceName` if the name cannot be parsed.
    pub fn from_operation_name(
        kind: OperationKind,
        name: &str,
        started_at: DateTime<Utc>,
    ) -> CompatResult<Self> {
        let (cluster, operation_id) = parse_operation_name(name)?;
        Ok(Self::new(kind, operation_id, started_at, cluster))
    }

    /// Mutation kind
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Numeric operation ID
    pub fn operation_id(&self) -> u64 {
        self.operation_id
    }

    /// When the service began the operation
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Owning cluster
    pub fn cluster(&self) -> &ClusterRef {
        &self.cluster
    }

    /// True once a poll has observed completion
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Name used when querying the operation's status
    pub fn operation_name(&self) -> String {
        self.cluster.operation_name(self.operation_id)
    }

    pub(crate) fn mark_complete(&mut self) {
        debug_assert!(!self.completed, "operation completed twice");
        self.completed = true;
    }
}
