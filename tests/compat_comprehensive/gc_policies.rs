//! Tier 3: Column family GC policies in their flat legacy form

use crate::test_utils::*;
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Duration;

const ONE_DAY: u64 = 86_400;

#[test]
fn test_describe_mixed_families() {
    let mut rules = BTreeMap::new();
    rules.insert("versions".to_string(), GcRule::MaxVersions(3));
    rules.insert(
        "both".to_string(),
        GcRule::Intersection(vec![
            GcRule::MaxAge(Duration::from_secs(ONE_DAY)),
            GcRule::MaxVersions(1),
        ]),
    );
    rules.insert(
        "either".to_string(),
        GcRule::Union(vec![
            GcRule::MaxVersions(1),
            GcRule::MaxAge(Duration::from_secs(ONE_DAY)),
        ]),
    );

    let described = describe_families(&rules);

    assert_eq!(
        described["versions"],
        GcPolicyView::Dict(GcPolicy::max_versions(3))
    );
    assert_eq!(
        described["both"].as_dict(),
        Some(&GcPolicy {
            max_versions: Some(1),
            time_to_live: Some(ONE_DAY),
        })
    );
    assert_eq!(described["either"], GcPolicyView::Opaque(rules["either"].clone()));
    assert_eq!(
        serde_json::to_value(&described["both"]).unwrap(),
        json!({ "max_versions": 1, "time_to_live": ONE_DAY })
    );
}

#[test]
fn test_sub_second_age_stays_opaque() {
    let rule = GcRule::MaxAge(Duration::from_millis(1_500));
    assert_eq!(gc_rule_to_dict(&rule), GcPolicyView::Opaque(rule));
}

#[test]
fn test_family_rules_from_json_policies() {
    let policies: BTreeMap<String, GcPolicy> = serde_json::from_value(json!({
        "cf1": { "max_versions": 2 },
        "cf2": { "time_to_live": ONE_DAY },
        "cf3": { "max_versions": 1, "time_to_live": 60 },
    }))
    .unwrap();

    let rules = family_rules(&policies).unwrap();

    assert_eq!(rules["cf1"], GcRule::MaxVersions(2));
    assert_eq!(rules["cf2"], GcRule::MaxAge(Duration::from_secs(ONE_DAY)));
    assert_eq!(
        rules["cf3"],
        GcRule::Intersection(vec![
            GcRule::MaxVersions(1),
            GcRule::MaxAge(Duration::from_secs(60)),
        ])
    );
}

#[test]
fn test_family_rules_rejects_bad_policy() {
    let mut policies = BTreeMap::new();
    policies.insert("cf".to_string(), GcPolicy::max_versions(0));
    let err = family_rules(&policies).unwrap_err();
    assert!(matches!(err, CompatError::InvalidArgument(_)));

    policies.insert("cf".to_string(), GcPolicy::default());
    assert!(family_rules(&policies).unwrap_err().is_invalid());
}

#[test]
fn test_unknown_policy_key_rejected() {
    let parsed: Result<GcPolicy, _> = serde_json::from_value(json!({ "compression": "gz" }));
    assert!(parsed.is_err());
}
