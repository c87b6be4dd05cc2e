//! Column family garbage-collection rules
//!
//! The service attaches a GC rule tree to every column family. Legacy
//! callers expect a flat mapping instead (`max_versions`, `time_to_live`).
//! Only three rule shapes have a faithful flat form; everything else is
//! handed back as the structured rule.

use crate::error::{CompatError, CompatResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Policy key for the version cap
pub const MAX_VERSIONS_KEY: &str = "max_versions";
/// Policy key for the maximum cell age, in seconds
pub const TIME_TO_LIVE_KEY: &str = "time_to_live";

/// Garbage-collection rule attached to a column family
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GcRule {
    /// Keep at most N versions of each cell
    MaxVersions(u32),
    /// Delete cells older than the given age
    MaxAge(Duration),
    /// Delete cells matched by every child rule
    Intersection(Vec<GcRule>),
    /// Delete cells matched by any child rule
    Union(Vec<GcRule>),
}

/// Flat legacy view of a GC rule
///
/// Serializes as a mapping containing only the keys that are set, e.g.
/// `{"max_versions": 3}` or `{"max_versions": 3, "time_to_live": 86400}`.
/// An empty mapping does not deserialize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GcPolicyFields")]
pub struct GcPolicy {
    /// Version cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_versions: Option<u32>,
    /// Maximum cell age in whole seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_live: Option<u64>,
}

/// Wire shape of `GcPolicy` before the non-empty check
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct GcPolicyFields {
    #[serde(default)]
    max_versions: Option<u32>,
    #[serde(default)]
    time_to_live: Option<u64>,
}

impl TryFrom<GcPolicyFields> for GcPolicy {
    type Error = String;

    fn try_from(fields: GcPolicyFields) -> Result<Self, Self::Error> {
        let policy = GcPolicy {
            max_versions: fields.max_versions,
            time_to_live: fields.time_to_live,
        };
        if policy.is_empty() {
            return Err(format!(
                "GC policy needs {} or {}",
                MAX_VERSIONS_KEY, TIME_TO_LIVE_KEY
            ));
        }
        Ok(policy)
    }
}

impl GcPolicy {
    /// Policy with only a version cap
    pub fn max_versions(versions: u32) -> Self {
        Self {
            max_versions: Some(versions),
            time_to_live: None,
        }
    }

    /// Policy with only a time-to-live
    pub fn time_to_live(seconds: u64) -> Self {
        Self {
            max_versions: None,
            time_to_live: Some(seconds),
        }
    }

    /// True when neither key is set
    pub fn is_empty(&self) -> bool {
        self.max_versions.is_none() && self.time_to_live.is_none()
    }
}

/// Result of flattening a GC rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GcPolicyView {
    /// Rule has a flat form
    Dict(GcPolicy),
    /// Rule shape has no flat form and is returned unchanged
    Opaque(GcRule),
}

impl GcPolicyView {
    /// Flat form, if there is one
    pub fn as_dict(&self) -> Option<&GcPolicy> {
        match self {
            GcPolicyView::Dict(policy) => Some(policy),
            GcPolicyView::Opaque(_) => None,
        }
    }
}

fn whole_seconds(age: &Duration) -> Option<u64> {
    (age.subsec_nanos() == 0).then(|| age.as_secs())
}

/// Flatten a GC rule to its legacy mapping where possible.
///
/// Flattened shapes:
/// - `MaxVersions(n)` -> `{"max_versions": n}`
/// - `MaxAge(d)` -> `{"time_to_live": secs}` (whole seconds only)
/// - `Intersection([MaxVersions, MaxAge])` in either order -> both keys
///
/// Unions, repeated kinds, nested composites, sub-second ages and zero
/// version caps come back as `GcPolicyView::Opaque` holding the original
/// rule, so every `Dict` converts back with `gc_rule_from_dict`.
pub fn gc_rule_to_dict(rule: &GcRule) -> GcPolicyView {
    let flat = match rule {
        GcRule::MaxVersions(versions) => Some(GcPolicy::max_versions(*versions)),
        GcRule::MaxAge(age) => whole_seconds(age).map(GcPolicy::time_to_live),
        GcRule::Intersection(rules) => match rules.as_slice() {
            [GcRule::MaxVersions(versions), GcRule::MaxAge(age)]
            | [GcRule::MaxAge(age), GcRule::MaxVersions(versions)] => {
                whole_seconds(age).map(|ttl| GcPolicy {
                    max_versions: Some(*versions),
                    time_to_live: Some(ttl),
                })
            }
            _ => None,
        },
        GcRule::Union(_) => None,
    };

    match flat.filter(|policy| policy.max_versions != Some(0)) {
        Some(policy) => GcPolicyView::Dict(policy),
        None => GcPolicyView::Opaque(rule.clone()),
    }
}

/// Build a GC rule from its legacy mapping.
///
/// A single key yields the single rule; both keys yield an intersection of
/// the version cap and the age limit, in that order.
///
/// # Errors
///
/// Returns `InvalidArgument` if the mapping is empty or `max_versions` is 0.
pub fn gc_rule_from_dict(policy: &GcPolicy) -> CompatResult<GcRule> {
    if policy.max_versions == Some(0) {
        return Err(CompatError::invalid_argument(format!(
            "{} must be at least 1",
            MAX_VERSIONS_KEY
        )));
    }

    match (policy.max_versions, policy.time_to_live) {
        (Some(versions), None) => Ok(GcRule::MaxVersions(versions)),
        (None, Some(ttl)) => Ok(GcRule::MaxAge(Duration::from_secs(ttl))),
        (Some(versions), Some(ttl)) => Ok(GcRule::Intersection(vec![
            GcRule::MaxVersions(versions),
            GcRule::MaxAge(Duration::from_secs(ttl)),
        ])),
        (None, None) => Err(CompatError::invalid_argument(format!(
            "GC policy needs {} or {}",
            MAX_VERSIONS_KEY, TIME_TO_LIVE_KEY
        ))),
    }
}
