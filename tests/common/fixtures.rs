use std::sync::Arc;
use std::time::Duration;

use auditdesk::{AlwaysFail, AlwaysSucceed, AuditStatus, FixedDelay, MockApi, Project, ProjectStatus, Severity};
use time::macros::datetime;

/// Route tracing output to the test harness. Safe to call from every
/// test; only the first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// API whose every call succeeds instantly.
pub fn reliable_api() -> MockApi {
    MockApi::with_policy(Arc::new(AlwaysSucceed))
}

/// API whose every call fails instantly with its operation's message.
pub fn failing_api() -> MockApi {
    MockApi::with_policy(Arc::new(AlwaysFail))
}

/// API whose every call succeeds after a constant delay.
pub fn delayed_api(delay: Duration) -> MockApi {
    MockApi::with_policy(Arc::new(FixedDelay(delay)))
}

/// A project with sensible defaults; tests overwrite the fields they
/// exercise.
pub fn make_project(id: &str, name: &str) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        county: "Nairobi".to_string(),
        sector: "Roads & Transport".to_string(),
        contract_sum: 1_000_000_000,
        amount_paid: 500_000_000,
        risk_level: Severity::Low,
        audit_status: AuditStatus::UnderReview,
        entity: "Kenya National Highways Authority".to_string(),
        last_updated: datetime!(2024-01-01 00:00 UTC),
        status: ProjectStatus::OnTrack,
        milestones: Vec::new(),
    }
}

/// Ids of a project list, for permutation and ordering assertions.
pub fn ids(projects: &[Project]) -> Vec<&str> {
    projects.iter().map(|project| project.id.as_str()).collect()
}
