//! Tier 4: Config, resource names and poller wired together

use crate::test_utils::*;
use std::time::Duration;
use tempfile::TempDir;

// =============================================================================
// Config
// =============================================================================

#[test]
fn test_config_file_drives_compiler_and_poller() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        r#"
[filter]
timestamp_semantics = "exclusive"

[operations]
max_retries = 2
base_wait_ms = 0
rpc_timeout_secs = 3
"#,
    )
    .unwrap();

    let config = CompatConfig::from_file(&path).unwrap();

    let table = Table::new("events", config.filter_compiler());
    let plan = table.row("r", &[], Some(1_000)).unwrap();
    assert_eq!(
        plan.filter,
        Some(PredicateNode::Chain(vec![
            PredicateNode::row_key("r"),
            PredicateNode::version_limit(1),
            ts_until(1_000),
        ]))
    );

    let mut handle = create_handle(21);
    let mut service = ScriptedService::new(ScriptedService::not_done(2));
    let mut sleeper = RecordingSleeper::default();
    let err = config
        .operation_poller()
        .poll(&mut handle, &mut service, &mut sleeper, None)
        .unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(sleeper.waits, vec![Duration::ZERO, Duration::ZERO]);
    assert!(service
        .calls
        .iter()
        .all(|(_, timeout)| *timeout == Duration::from_secs(3)));
}

#[test]
fn test_default_config_written_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    CompatConfig::write_default_if_missing(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, CompatConfig::default_toml());

    let config = CompatConfig::from_file(&path).unwrap();
    assert_eq!(config.poll_config(), PollConfig::default());
    assert_eq!(
        config.filter_compiler().timestamp_semantics(),
        TimestampSemantics::Inclusive
    );
}

#[test]
fn test_malformed_config_is_config_error() {
    let err = CompatConfig::from_toml_str("[operations]\nmax_retries = \"ten\"\n").unwrap_err();
    assert!(matches!(err, CompatError::Config(_)));
}

// =============================================================================
// Resource Names
// =============================================================================

#[test]
fn test_operation_name_round_trips_through_handle() {
    let handle = create_handle(246_810);
    assert_eq!(handle.operation_id(), 246_810);
    assert_eq!(handle.cluster(), &cluster());
    assert_eq!(handle.kind(), OperationKind::Create);
    assert_eq!(handle.started_at(), started_at());
    assert_eq!(handle.operation_name(), cluster().operation_name(246_810));
}

#[test]
fn test_bad_operation_names_rejected() {
    for name in [
        "operations/projects/p/zones/z/clusters/c/operations/abc",
        "operations/projects/p/zones/z/clusters/Cluster/operations/1",
        "projects/p/zones/z/clusters/c/operations/1",
        "operations/projects/p/zones/z/clusters/c/operations/99999999999999999999999",
    ] {
        let err = parse_operation_name(name).unwrap_err();
        assert!(matches!(err, CompatError::InvalidResourceName(_)), "{}", name);
    }
}

#[test]
fn test_cluster_owns_its_tables() {
    let owner = ClusterRef::parse(&cluster().name()).unwrap();
    assert_eq!(owner, cluster());

    let table_name = format!("{}/tables/events", owner.name());
    assert_eq!(owner.table_id(&table_name).unwrap(), "events");

    let other = ClusterRef::new(PROJECT_ID, ZONE_NAME, "other-cluster");
    assert!(other.table_id(&table_name).is_err());
}

#[test]
fn test_tracing_init_is_idempotent() {
    init_tracing();
    assert!(!init_tracing());
}
