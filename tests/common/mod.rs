mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from auditdesk for tests
pub use auditdesk::{
    AlwaysFail, AlwaysSucceed, ApiError, AuditFlag, AuditStatus, FetchController, FetchState,
    Filter, FixedDelay, FlagRepository, FlagStatus, MetricsRepository, MockApi, Project,
    ProjectFilter, ProjectRepository, ProjectSortKey, ProjectStatus, ProjectUpdate,
    ReportRepository, ReportStatus, Severity, SortDirection, SortState, TableState,
    TaskRepository, TaskStatus, filter_records, paginate, sort_records,
};
