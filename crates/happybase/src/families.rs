//! Column family descriptions in the legacy flat form

use bigtable_compat_core::{
    gc_rule_from_dict, gc_rule_to_dict, CompatError, CompatResult, GcPolicy, GcPolicyView, GcRule,
};
use std::collections::BTreeMap;

/// Describe every column family's GC rule in the legacy flat form.
///
/// Families whose rule has no flat form keep the structured rule.
pub fn describe_families(rules: &BTreeMap<String, GcRule>) -> BTreeMap<String, GcPolicyView> {
    rules
        .iter()
        .map(|(family, rule)| (family.clone(), gc_rule_to_dict(rule)))
        .collect()
}

/// Build GC rules from legacy per-family options
///
/// # Errors
///
/// Returns `InvalidArgument` naming the first family whose options are empty
/// or carry a zero version cap.
pub fn family_rules(
    options: &BTreeMap<String, GcPolicy>,
) -> CompatResult<BTreeMap<String, GcRule>> {
    options
        .iter()
        .map(|(family, policy)| {
            gc_rule_from_dict(policy)
                .map(|rule| (family.clone(), rule))
                .map_err(|e| {
                    CompatError::invalid_argument(format!("column family '{}': {}", family, e))
                })
        })
        .collect()
}
