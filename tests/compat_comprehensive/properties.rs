//! Tier 5: Properties over random input

use crate::test_utils::*;
use proptest::prelude::*;
use std::time::Duration;

fn arb_selector() -> impl Strategy<Value = String> {
    ("[a-z]{1,6}", proptest::option::of("[a-z0-9]{0,6}")).prop_map(|(family, qualifier)| {
        match qualifier {
            Some(qualifier) => format!("{}:{}", family, qualifier),
            None => family,
        }
    })
}

proptest! {
    #[test]
    fn test_prefix_range_contains_exactly_prefixed_keys(
        prefix in proptest::collection::vec(any::<u8>(), 1..6),
        suffix in proptest::collection::vec(any::<u8>(), 0..6),
        other in proptest::collection::vec(any::<u8>(), 0..8),
    ) {
        let range = RowRange::prefix(prefix.clone());

        let mut key = prefix.clone();
        key.extend_from_slice(&suffix);
        prop_assert!(range.contains(&key));
        prop_assert_eq!(range.contains(&other), other.starts_with(&prefix));
    }

    #[test]
    fn test_compile_is_deterministic(
        columns in proptest::collection::vec(arb_selector(), 0..4),
        versions in proptest::option::of(1u32..10),
        timestamp in proptest::option::of(0i64..4_000_000_000_000),
    ) {
        let mut intent = ReadIntent::new()
            .with_columns(ColumnSelector::parse_all(&columns).unwrap());
        intent.versions = versions;
        intent.timestamp = timestamp;
        let compiler = FilterCompiler::new();

        match compiler.compile(&intent) {
            Ok(first) => {
                prop_assert!(first.is_well_formed());
                prop_assert_eq!(first, compiler.compile(&intent).unwrap());
            }
            Err(err) => {
                prop_assert!(!intent.has_clauses());
                prop_assert!(matches!(err, CompatError::InvalidRequest(_)));
            }
        }
    }

    #[test]
    fn test_never_done_poll_sleeps_full_schedule(max_retries in 0u32..8) {
        let config = PollConfig::new()
            .with_max_retries(max_retries)
            .with_base_wait(Duration::from_millis(10));
        let queries = max_retries.max(1) as usize;
        let mut handle = create_handle(1);
        let mut service = ScriptedService::new(ScriptedService::not_done(queries));
        let mut sleeper = RecordingSleeper::default();

        let err = OperationPoller::new(config)
            .poll(&mut handle, &mut service, &mut sleeper, None)
            .unwrap_err();

        prop_assert!(err.is_timeout());
        prop_assert_eq!(service.call_count(), queries);
        prop_assert_eq!(sleeper.waits, config.schedule());
    }
}
