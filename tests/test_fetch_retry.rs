//! Fetch/retry state machine tests: the loading → success/error → retry
//! transitions and the request-token guard against stale completions.

mod common;

use auditdesk::AuditFlag;
use common::*;

#[test]
fn controller_starts_idle() {
    let controller: FetchController<Vec<AuditFlag>> = FetchController::new();

    assert!(matches!(controller.state(), FetchState::Idle));
    assert!(!controller.is_loading());
    assert!(controller.data().is_none());
    assert!(controller.error().is_none());
}

#[test]
fn successful_fetch_stores_the_data() {
    let mut controller = FetchController::new();

    let token = controller.start();
    assert!(controller.is_loading());
    assert!(!controller.is_retrying());

    assert!(controller.resolve(token, Ok(vec!["PRJ-2024-001".to_string()])));
    assert_eq!(controller.data().map(Vec::len), Some(1));
    assert!(!controller.is_loading());
}

#[test]
fn retry_after_error_clears_the_message_while_loading() {
    let mut controller: FetchController<Vec<String>> = FetchController::new();

    // 1. Initial fetch fails.
    let token = controller.start();
    let failure = ApiError::transient("Failed to fetch audit flags. Please try again.");
    assert!(controller.resolve(token, Err(failure)));
    assert_eq!(
        controller.error(),
        Some("Failed to fetch audit flags. Please try again.")
    );

    // 2. Retry re-enters loading with the retry indicator and no stale
    //    error message.
    let token = controller.retry();
    assert!(controller.is_loading());
    assert!(controller.is_retrying());
    assert!(controller.error().is_none());
    assert!(controller.data().is_none());

    // 3. The retried fetch succeeds and the indicator clears.
    assert!(controller.resolve(token, Ok(vec!["FLAG-001".to_string()])));
    assert!(!controller.is_retrying());
    assert_eq!(controller.data().map(Vec::len), Some(1));
}

#[test]
fn retry_can_fail_again_with_a_fresh_message() {
    let mut controller: FetchController<Vec<String>> = FetchController::new();

    let token = controller.start();
    controller.resolve(token, Err(ApiError::transient("first failure")));

    let token = controller.retry();
    controller.resolve(token, Err(ApiError::transient("second failure")));

    assert_eq!(controller.error(), Some("second failure"));
    assert!(!controller.is_retrying());
}

#[test]
fn not_found_message_names_the_missing_id() {
    let mut controller: FetchController<Vec<String>> = FetchController::new();

    let token = controller.start();
    controller.resolve(token, Err(ApiError::not_found("Audit flag", "FLAG-999")));

    assert_eq!(
        controller.error(),
        Some("Audit flag with ID FLAG-999 not found.")
    );
}

#[test]
fn empty_failure_message_falls_back_to_the_generic_one() {
    let mut controller: FetchController<Vec<String>> = FetchController::new();

    let token = controller.start();
    controller.resolve(token, Err(ApiError::transient("")));

    assert_eq!(controller.error(), Some("Unknown error occurred"));
}

#[test]
fn a_newer_request_supersedes_the_one_in_flight() {
    let mut controller: FetchController<&str> = FetchController::new();

    let first = controller.start();
    let second = controller.start();

    // The superseded completion is discarded without touching state.
    assert!(!controller.resolve(first, Ok("stale")));
    assert!(controller.is_loading());

    assert!(controller.resolve(second, Ok("fresh")));
    assert_eq!(controller.data(), Some(&"fresh"));
}

#[test]
fn completions_after_the_page_settled_are_ignored() {
    let mut controller: FetchController<&str> = FetchController::new();

    let token = controller.start();
    assert!(controller.resolve(token, Ok("settled")));

    // The same token cannot resolve twice, and an unknown token never
    // resolves at all.
    assert!(!controller.resolve(token, Ok("replay")));
    assert!(!controller.resolve(token + 40, Err(ApiError::transient("lost"))));
    assert_eq!(controller.data(), Some(&"settled"));
}

#[tokio::test(start_paused = true)]
async fn error_then_retry_against_the_simulated_api() {
    init_tracing();
    let mut controller: FetchController<Vec<AuditFlag>> = FetchController::new();

    // 1. First fetch against a failing network ends in the error state.
    let api = failing_api();
    let token = controller.start();
    let result = api.get_audit_flags().await;
    assert!(controller.resolve(token, result));
    assert_eq!(
        controller.error(),
        Some("Failed to fetch audit flags. Please try again.")
    );

    // 2. Retry along the identical fetch path, this time succeeding.
    let api = reliable_api();
    let token = controller.retry();
    assert!(controller.is_retrying());
    let result = api.get_audit_flags().await;
    assert!(controller.resolve(token, result));

    assert_eq!(controller.data().map(Vec::len), Some(5));
    assert!(!controller.is_retrying());
}
