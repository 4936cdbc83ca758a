mod error;
mod flag;
mod metrics;
mod model;
mod network;
mod project;
mod report;
mod store;
mod task;

use std::sync::Arc;

use store::Store;

pub use error::{ApiError, ApiResult};
pub use flag::{AuditFlag, FlagFilter, FlagRepository, FlagSortKey, FlagStatus, FlagTally};
pub use metrics::{ChartPoint, DashboardMetrics, KpiData, MetricsRepository};
pub use model::{Severity, format_currency, format_date};
pub use network::{
    AlwaysFail, AlwaysSucceed, FixedDelay, NetworkPolicy, Operation, SimulatedNetwork,
};
pub use project::{
    AuditStatus, Milestone, Project, ProjectFilter, ProjectRepository, ProjectSortKey,
    ProjectStatus, ProjectUpdate,
};
pub use report::{
    AuditReport, ReportFilter, ReportRepository, ReportSortKey, ReportStatus, ReportType,
};
pub use task::{AuditTask, TaskRepository, TaskStatus};

/// The simulated API every page talks to: fixture collections behind a
/// flaky-network facade. Swappable for a real HTTP client later; the
/// repository traits are the endpoint contract.
pub struct MockApi {
    store: Store,
    policy: Arc<dyn NetworkPolicy>,
}

impl MockApi {
    /// Fixture store behind the production latency/failure simulation.
    pub fn new() -> Self {
        Self::with_policy(Arc::new(SimulatedNetwork))
    }

    /// Fixture store behind a caller-supplied policy; tests pass a
    /// deterministic one.
    pub fn with_policy(policy: Arc<dyn NetworkPolicy>) -> Self {
        MockApi {
            store: Store::seeded(),
            policy,
        }
    }

    /// The operation's artificial delay, the only suspension point in
    /// the crate.
    async fn latency(&self, operation: Operation) {
        let delay = self.policy.delay_for(operation);
        tracing::debug!(
            operation = operation.name(),
            delay_ms = delay.as_millis() as u64,
            "dispatching simulated call"
        );
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn failure_roll(&self, operation: Operation) -> ApiResult<()> {
        if self.policy.should_fail(operation) {
            tracing::warn!(operation = operation.name(), "injected transient failure");
            return Err(ApiError::transient(operation.failure_message()));
        }
        Ok(())
    }

    /// One simulated round trip for operations with no id to miss.
    async fn call(&self, operation: Operation) -> ApiResult<()> {
        self.latency(operation).await;
        self.failure_roll(operation)
    }
}

impl Default for MockApi {
    fn default() -> Self {
        MockApi::new()
    }
}

impl ProjectRepository for MockApi {
    async fn get_projects(&self) -> ApiResult<Vec<Project>> {
        self.call(Operation::ListProjects).await?;
        Ok(self.store.projects.list().await)
    }

    async fn get_project_by_id(&self, id: &str) -> ApiResult<Project> {
        self.latency(Operation::GetProject).await;
        // Not-found is deterministic and wins over the failure roll; a
        // missing id never presents as a transient fault.
        let project = self
            .store
            .projects
            .get(id)
            .await
            .ok_or_else(|| ApiError::not_found("Project", id))?;
        self.failure_roll(Operation::GetProject)?;
        Ok(project)
    }

    async fn update_project(&self, id: &str, update: ProjectUpdate) -> ApiResult<Project> {
        self.latency(Operation::UpdateProject).await;
        let project = self
            .store
            .projects
            .get(id)
            .await
            .ok_or_else(|| ApiError::not_found("Project", id))?;
        self.failure_roll(Operation::UpdateProject)?;
        let updated = update.apply(project);
        self.store.projects.replace(updated.clone()).await;
        Ok(updated)
    }
}

impl FlagRepository for MockApi {
    async fn get_audit_flags(&self) -> ApiResult<Vec<AuditFlag>> {
        self.call(Operation::ListFlags).await?;
        Ok(self.store.flags.list().await)
    }

    async fn get_audit_flag_by_id(&self, id: &str) -> ApiResult<AuditFlag> {
        self.latency(Operation::GetFlag).await;
        let flag = self
            .store
            .flags
            .get(id)
            .await
            .ok_or_else(|| ApiError::not_found("Audit flag", id))?;
        self.failure_roll(Operation::GetFlag)?;
        Ok(flag)
    }

    async fn update_audit_flag_status(&self, id: &str, status: FlagStatus) -> ApiResult<AuditFlag> {
        self.latency(Operation::UpdateFlagStatus).await;
        let mut flag = self
            .store
            .flags
            .get(id)
            .await
            .ok_or_else(|| ApiError::not_found("Audit flag", id))?;
        self.failure_roll(Operation::UpdateFlagStatus)?;
        flag.status = status;
        self.store.flags.replace(flag.clone()).await;
        Ok(flag)
    }
}

impl TaskRepository for MockApi {
    async fn get_audit_tasks(&self) -> ApiResult<Vec<AuditTask>> {
        self.call(Operation::ListTasks).await?;
        Ok(self.store.tasks.list().await)
    }

    async fn update_task_status(&self, id: &str, status: TaskStatus) -> ApiResult<AuditTask> {
        self.latency(Operation::UpdateTaskStatus).await;
        let mut task = self
            .store
            .tasks
            .get(id)
            .await
            .ok_or_else(|| ApiError::not_found("Task", id))?;
        self.failure_roll(Operation::UpdateTaskStatus)?;
        task.status = status;
        self.store.tasks.replace(task.clone()).await;
        Ok(task)
    }

    async fn get_tasks_by_project(&self, project_id: &str) -> ApiResult<Vec<AuditTask>> {
        self.call(Operation::TasksByProject).await?;
        Ok(self
            .store
            .tasks
            .list()
            .await
            .into_iter()
            .filter(|task| task.project_id == project_id)
            .collect())
    }
}

impl ReportRepository for MockApi {
    async fn get_audit_reports(&self) -> ApiResult<Vec<AuditReport>> {
        self.call(Operation::ListReports).await?;
        Ok(self.store.reports.list().await)
    }

    async fn get_report_by_id(&self, id: &str) -> ApiResult<AuditReport> {
        self.latency(Operation::GetReport).await;
        let report = self
            .store
            .reports
            .get(id)
            .await
            .ok_or_else(|| ApiError::not_found("Report", id))?;
        self.failure_roll(Operation::GetReport)?;
        Ok(report)
    }

    async fn update_report_status(&self, id: &str, status: ReportStatus) -> ApiResult<AuditReport> {
        self.latency(Operation::UpdateReportStatus).await;
        let mut report = self
            .store
            .reports
            .get(id)
            .await
            .ok_or_else(|| ApiError::not_found("Report", id))?;
        self.failure_roll(Operation::UpdateReportStatus)?;
        report.status = status;
        report.updated_at = time::OffsetDateTime::now_utc();
        self.store.reports.replace(report.clone()).await;
        Ok(report)
    }
}

impl MetricsRepository for MockApi {
    async fn get_dashboard_metrics(&self) -> ApiResult<DashboardMetrics> {
        self.call(Operation::DashboardMetrics).await?;
        Ok(self.store.metrics.clone())
    }
}
