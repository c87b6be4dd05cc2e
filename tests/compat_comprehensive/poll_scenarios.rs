//! Tier 2: Poll scenarios against a scripted status service

use crate::test_utils::*;
use std::time::Duration;

fn poller(max_retries: u32) -> OperationPoller {
    OperationPoller::new(
        PollConfig::new()
            .with_max_retries(max_retries)
            .with_base_wait(Duration::from_secs(1)),
    )
}

// =============================================================================
// Completion
// =============================================================================

#[test]
fn test_done_on_third_query() {
    let mut handle = create_handle(1234);
    let mut service = ScriptedService::done_after(2);
    let mut sleeper = RecordingSleeper::default();

    let status = poller(3)
        .poll(&mut handle, &mut service, &mut sleeper, None)
        .unwrap();

    assert!(status.done);
    assert_eq!(status.response, Some(b"response".to_vec()));
    assert_eq!(service.call_count(), 3);
    assert_eq!(sleeper.waits, secs(&[1, 2]));
    assert!(handle.is_complete());
}

#[test]
fn test_done_immediately_never_sleeps() {
    let mut handle = create_handle(1);
    let mut service = ScriptedService::done_after(0);
    let mut sleeper = RecordingSleeper::default();

    poller(10)
        .poll(&mut handle, &mut service, &mut sleeper, None)
        .unwrap();

    assert_eq!(service.call_count(), 1);
    assert!(sleeper.waits.is_empty());
}

#[test]
fn test_queries_carry_operation_name_and_timeout() {
    let mut handle = create_handle(77);
    let mut service = ScriptedService::done_after(1);
    let mut sleeper = RecordingSleeper::default();

    poller(3)
        .poll(&mut handle, &mut service, &mut sleeper, None)
        .unwrap();

    let expected_name = format!(
        "operations/projects/{}/zones/{}/clusters/{}/operations/77",
        PROJECT_ID, ZONE_NAME, CLUSTER_ID
    );
    for (name, timeout) in &service.calls {
        assert_eq!(name, &expected_name);
        assert_eq!(*timeout, Duration::from_secs(10));
    }
}

#[test]
fn test_timeout_budget_overrides_rpc_timeout() {
    let mut handle = create_handle(5);
    let mut service = ScriptedService::done_after(0);
    let mut sleeper = RecordingSleeper::default();

    poller(3)
        .poll(
            &mut handle,
            &mut service,
            &mut sleeper,
            Some(Duration::from_secs(199)),
        )
        .unwrap();

    assert_eq!(service.calls[0].1, Duration::from_secs(199));
}

// =============================================================================
// Timeout
// =============================================================================

#[test]
fn test_never_done_times_out_after_full_schedule() {
    let mut handle = create_handle(9);
    let mut service = ScriptedService::new(ScriptedService::not_done(5));
    let mut sleeper = RecordingSleeper::default();

    let err = poller(5)
        .poll(&mut handle, &mut service, &mut sleeper, None)
        .unwrap_err();

    assert_eq!(
        err,
        CompatError::OperationTimeout {
            operation_id: 9,
            attempts: 5
        }
    );
    assert!(err.is_timeout());
    assert_eq!(sleeper.waits, secs(&[1, 2, 4, 8, 16]));
    assert!(!handle.is_complete());
}

#[test]
fn test_zero_retries_queries_once() {
    let mut handle = create_handle(9);
    let mut service = ScriptedService::new(ScriptedService::not_done(1));
    let mut sleeper = RecordingSleeper::default();

    let err = poller(0)
        .poll(&mut handle, &mut service, &mut sleeper, None)
        .unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(service.call_count(), 1);
    assert!(sleeper.waits.is_empty());
}

#[test]
fn test_poll_again_after_timeout() {
    let mut handle = create_handle(3);
    let mut first = ScriptedService::new(ScriptedService::not_done(2));
    let mut sleeper = RecordingSleeper::default();
    let poller = poller(2);

    assert!(poller
        .poll(&mut handle, &mut first, &mut sleeper, None)
        .unwrap_err()
        .is_timeout());

    let mut second = ScriptedService::done_after(1);
    let status = poller
        .poll(&mut handle, &mut second, &mut sleeper, None)
        .unwrap();
    assert!(status.done);
    // Backoff restarts from the base wait for the second poll
    assert_eq!(sleeper.waits, secs(&[1, 2, 1]));
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_query_failure_ends_poll() {
    let mut handle = create_handle(4);
    let mut service = ScriptedService::new(vec![
        Ok(OperationStatus::pending()),
        Err(CompatError::query_failed("unavailable")),
    ]);
    let mut sleeper = RecordingSleeper::default();

    let err = poller(10)
        .poll(&mut handle, &mut service, &mut sleeper, None)
        .unwrap_err();

    assert_eq!(err, CompatError::query_failed("unavailable"));
    assert_eq!(sleeper.waits, secs(&[1]));
    assert!(!handle.is_complete());
}

#[test]
fn test_completed_handle_is_rejected() {
    let mut handle = create_handle(8);
    let mut sleeper = RecordingSleeper::default();
    let poller = poller(3);
    poller
        .poll(
            &mut handle,
            &mut ScriptedService::done_after(0),
            &mut sleeper,
            None,
        )
        .unwrap();

    let mut untouched = ScriptedService::new(Vec::new());
    let err = poller
        .poll(&mut handle, &mut untouched, &mut sleeper, None)
        .unwrap_err();
    assert_eq!(err, CompatError::OperationAlreadyComplete { operation_id: 8 });
    assert_eq!(untouched.call_count(), 0);

    let err = poller.check(&mut handle, &mut untouched, None).unwrap_err();
    assert_eq!(err, CompatError::OperationAlreadyComplete { operation_id: 8 });
}

#[test]
fn test_check_is_one_shot() {
    let mut handle = create_handle(6);
    let mut service = ScriptedService::done_after(1);
    let poller = poller(3);

    assert!(!poller.check(&mut handle, &mut service, None).unwrap());
    assert!(!handle.is_complete());
    assert!(poller.check(&mut handle, &mut service, None).unwrap());
    assert!(handle.is_complete());
    assert_eq!(service.call_count(), 2);
}
