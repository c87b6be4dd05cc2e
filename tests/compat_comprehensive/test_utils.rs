//! Shared helpers for the comprehensive suite

#![allow(dead_code)]

pub use bigtable_compat::*;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::VecDeque;
use std::time::Duration;

// =============================================================================
// Predicates
// =============================================================================

/// Timestamp leaf with only an exclusive upper bound
pub fn ts_until(end_millis: i64) -> PredicateNode {
    PredicateNode::timestamp_range(
        TimestampRange::from_millis(None, Some(end_millis)).expect("valid timestamp"),
    )
}

/// `fam` AND `qualifier`
pub fn column_chain(family: &str, qualifier: &str) -> PredicateNode {
    PredicateNode::Chain(vec![
        PredicateNode::family(family),
        PredicateNode::qualifier(qualifier),
    ])
}

// =============================================================================
// Operations
// =============================================================================

pub const PROJECT_ID: &str = "project-id";
pub const ZONE_NAME: &str = "zone-name";
pub const CLUSTER_ID: &str = "cluster-id";

pub fn cluster() -> ClusterRef {
    ClusterRef::new(PROJECT_ID, ZONE_NAME, CLUSTER_ID)
}

pub fn started_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2015, 7, 29, 17, 0, 0).unwrap()
}

pub fn create_handle(operation_id: u64) -> OperationHandle {
    OperationHandle::from_operation_name(
        OperationKind::Create,
        &cluster().operation_name(operation_id),
        started_at(),
    )
    .expect("valid operation name")
}

/// Status query that replays a fixed script and records every call
pub struct ScriptedService {
    results: VecDeque<CompatResult<OperationStatus>>,
    pub calls: Vec<(String, Duration)>,
}

impl ScriptedService {
    pub fn new(results: Vec<CompatResult<OperationStatus>>) -> Self {
        Self {
            results: results.into(),
            calls: Vec::new(),
        }
    }

    /// `pending` not-done answers followed by one done answer
    pub fn done_after(pending: usize) -> Self {
        let mut results = Self::not_done(pending);
        results.push(Ok(OperationStatus::done(b"response".to_vec())));
        Self::new(results)
    }

    pub fn not_done(times: usize) -> Vec<CompatResult<OperationStatus>> {
        (0..times).map(|_| Ok(OperationStatus::pending())).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }
}

impl StatusQuery for ScriptedService {
    fn query(
        &mut self,
        handle: &OperationHandle,
        timeout: Duration,
    ) -> CompatResult<OperationStatus> {
        self.calls.push((handle.operation_name(), timeout));
        self.results
            .pop_front()
            .expect("status script exhausted")
    }
}

/// Sleeper that records requested waits instead of sleeping
#[derive(Default)]
pub struct RecordingSleeper {
    pub waits: Vec<Duration>,
}

impl Sleeper for RecordingSleeper {
    fn sleep(&mut self, duration: Duration) {
        self.waits.push(duration);
    }
}

pub fn secs(values: &[u64]) -> Vec<Duration> {
    values.iter().map(|&s| Duration::from_secs(s)).collect()
}
