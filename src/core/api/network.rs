use std::time::Duration;

use rand::Rng;

/// Every logical call the simulated API can dispatch.
///
/// Each operation carries its own latency window, failure probability and
/// failure message, matching the behavior the dashboard pages are written
/// against: list/detail reads are slow and flaky, status updates are
/// quicker and fail less often.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListProjects,
    GetProject,
    UpdateProject,
    ListFlags,
    GetFlag,
    UpdateFlagStatus,
    ListTasks,
    UpdateTaskStatus,
    TasksByProject,
    ListReports,
    GetReport,
    UpdateReportStatus,
    DashboardMetrics,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::ListProjects => "list-projects",
            Operation::GetProject => "get-project",
            Operation::UpdateProject => "update-project",
            Operation::ListFlags => "list-flags",
            Operation::GetFlag => "get-flag",
            Operation::UpdateFlagStatus => "update-flag-status",
            Operation::ListTasks => "list-tasks",
            Operation::UpdateTaskStatus => "update-task-status",
            Operation::TasksByProject => "tasks-by-project",
            Operation::ListReports => "list-reports",
            Operation::GetReport => "get-report",
            Operation::UpdateReportStatus => "update-report-status",
            Operation::DashboardMetrics => "dashboard-metrics",
        }
    }

    /// Latency window in milliseconds (inclusive lower, exclusive upper).
    pub fn delay_window(self) -> (u64, u64) {
        match self {
            Operation::ListProjects
            | Operation::GetProject
            | Operation::ListFlags
            | Operation::GetFlag
            | Operation::ListTasks
            | Operation::ListReports
            | Operation::DashboardMetrics => (1000, 2000),
            Operation::UpdateProject => (500, 1500),
            Operation::UpdateFlagStatus => (500, 1000),
            Operation::UpdateTaskStatus | Operation::UpdateReportStatus => (400, 1000),
            Operation::TasksByProject | Operation::GetReport => (500, 1300),
        }
    }

    /// Probability that the call fails after its delay has elapsed.
    pub fn failure_rate(self) -> f64 {
        match self {
            Operation::ListProjects
            | Operation::GetProject
            | Operation::ListFlags
            | Operation::GetFlag
            | Operation::ListTasks
            | Operation::ListReports
            | Operation::DashboardMetrics => 0.2,
            Operation::TasksByProject => 0.15,
            Operation::UpdateProject
            | Operation::UpdateFlagStatus
            | Operation::UpdateTaskStatus
            | Operation::UpdateReportStatus
            | Operation::GetReport => 0.1,
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::ListProjects => "Failed to fetch projects from server. Please try again!",
            Operation::GetProject => "Failed to fetch project details.",
            Operation::UpdateProject => "Failed to update project!",
            Operation::ListFlags => "Failed to fetch audit flags. Please try again.",
            Operation::GetFlag => "Failed to fetch audit flag details.",
            Operation::UpdateFlagStatus => "Failed to update audit flag status.",
            Operation::ListTasks => "Failed to fetch audit tasks. Please try again.",
            Operation::UpdateTaskStatus => "Failed to update task status.",
            Operation::TasksByProject => "Failed to fetch project tasks.",
            Operation::ListReports => "Failed to fetch audit reports. Please try again.",
            Operation::GetReport => "Failed to fetch report details.",
            Operation::UpdateReportStatus => "Failed to update report status.",
            Operation::DashboardMetrics => "Failed to fetch dashboard metrics. Please try again.",
        }
    }
}

/// Injectable failure/latency policy.
///
/// The production policy draws from a random source; tests supply a
/// deterministic one instead of relying on real randomness.
pub trait NetworkPolicy: Send + Sync {
    fn should_fail(&self, operation: Operation) -> bool;
    fn delay_for(&self, operation: Operation) -> Duration;
}

/// Production policy: uniform delay over the operation's window plus the
/// operation's failure roll.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedNetwork;

impl NetworkPolicy for SimulatedNetwork {
    fn should_fail(&self, operation: Operation) -> bool {
        rand::rng().random_bool(operation.failure_rate())
    }

    fn delay_for(&self, operation: Operation) -> Duration {
        let (low, high) = operation.delay_window();
        Duration::from_millis(rand::rng().random_range(low..high))
    }
}

/// Every call succeeds immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysSucceed;

impl NetworkPolicy for AlwaysSucceed {
    fn should_fail(&self, _operation: Operation) -> bool {
        false
    }

    fn delay_for(&self, _operation: Operation) -> Duration {
        Duration::ZERO
    }
}

/// Every call fails with its operation's message, immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysFail;

impl NetworkPolicy for AlwaysFail {
    fn should_fail(&self, _operation: Operation) -> bool {
        true
    }

    fn delay_for(&self, _operation: Operation) -> Duration {
        Duration::ZERO
    }
}

/// Every call succeeds after a constant delay.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl NetworkPolicy for FixedDelay {
    fn should_fail(&self, _operation: Operation) -> bool {
        false
    }

    fn delay_for(&self, _operation: Operation) -> Duration {
        self.0
    }
}
