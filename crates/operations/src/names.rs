//! Cluster and operation resource names
//!
//! Clusters are addressed as `projects/{project}/zones/{zone}/clusters/{id}`.
//! Long-running operations on a cluster are addressed as
//! `operations/{cluster name}/operations/{numeric id}`.

use bigtable_compat_core::{CompatError, CompatResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static CLUSTER_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^projects/(?P<project>[^/]+)/zones/(?P<zone>[^/]+)/clusters/(?P<cluster_id>[a-z][-a-z0-9]*)$",
    )
    .expect("valid cluster name regex")
});

static OPERATION_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^operations/projects/(?P<project>[^/]+)/zones/(?P<zone>[^/]+)/clusters/(?P<cluster_id>[a-z][-a-z0-9]*)/operations/(?P<operation_id>\d+)$",
    )
    .expect("valid operation name regex")
});

/// Reference to the cluster that owns a table or an operation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClusterRef {
    /// Project ID
    pub project: String,
    /// Zone name
    pub zone: String,
    /// Cluster ID
    pub cluster_id: String,
}

impl ClusterRef {
    /// Create a cluster reference
    pub fn new(
        project: impl Into<String>,
        zone: impl Into<String>,
        cluster_id: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            zone: zone.into(),
            cluster_id: cluster_id.into(),
        }
    }

    /// Parse a fully-qualified cluster name
    ///
    /// # Errors
    ///
    /// Returns `InvalidResourceName` if the name is not
    /// `projects/{p}/zones/{z}/clusters/{id}` with a lowercase cluster ID.
    pub fn parse(name: &str) -> CompatResult<Self> {
        let caps = CLUSTER_NAME_RE
            .captures(name)
            .ok_or_else(|| CompatError::invalid_resource_name(name))?;
        Ok(Self::new(
            &caps["project"],
            &caps["zone"],
            &caps["cluster_id"],
        ))
    }

    /// `projects/{project}/zones/{zone}`
    pub fn zone_name(&self) -> String {
        format!("projects/{}/zones/{}", self.project, self.zone)
    }

    /// `projects/{project}/zones/{zone}/clusters/{cluster_id}`
    pub fn name(&self) -> String {
        format!("{}/clusters/{}", self.zone_name(), self.cluster_id)
    }

    /// Name of an operation running against this cluster
    pub fn operation_name(&self, operation_id: u64) -> String {
        format!("operations/{}/operations/{}", self.name(), operation_id)
    }

    /// Extract the table ID from a table name owned by this cluster
    ///
    /// # Errors
    ///
    /// Returns `InvalidResourceName` if the table does not belong to this
    /// cluster or the ID is empty.
    pub fn table_id(&self, table_name: &str) -> CompatResult<String> {
        let prefix = format!("{}/tables/", self.name());
        match table_name.strip_prefix(prefix.as_str()) {
            Some(table_id) if !table_id.is_empty() => Ok(table_id.to_string()),
            _ => Err(CompatError::invalid_resource_name(table_name)),
        }
    }
}

impl fmt::Display for ClusterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Split an operation name into its owning cluster and numeric ID
///
/// # Errors
///
/// Returns `InvalidResourceName` if the name has the wrong shape or the ID
/// does not fit in a `u64`.
pub fn parse_operation_name(name: &str) -> CompatResult<(ClusterRef, u64)> {
    let caps = OPERATION_NAME_RE
        .captures(name)
        .ok_or_else(|| CompatError::invalid_resource_name(name))?;
    let operation_id = caps["operation_id"]
        .parse::<u64>()
        .map_err(|_| CompatError::invalid_resource_name(name))?;
    let cluster = ClusterRef::new(&caps["project"], &caps["zone"], &caps["cluster_id"]);
    Ok((cluster, operation_id))
}
