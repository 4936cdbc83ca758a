pub mod core;
pub mod query;

pub use crate::core::api::{
    AlwaysFail, AlwaysSucceed, ApiError, ApiResult, AuditFlag, AuditReport, AuditStatus,
    AuditTask, DashboardMetrics, FixedDelay, FlagFilter, FlagRepository, FlagSortKey, FlagStatus,
    FlagTally, MetricsRepository, Milestone, MockApi, NetworkPolicy, Operation, Project,
    ProjectFilter, ProjectRepository, ProjectSortKey, ProjectStatus, ProjectUpdate, ReportFilter,
    ReportRepository, ReportSortKey, ReportStatus, ReportType, Severity, SimulatedNetwork,
    TaskRepository, TaskStatus, format_currency, format_date,
};
pub use crate::core::fetch::{FetchController, FetchState, RequestToken};
pub use crate::query::{
    Filter, Page, SortDirection, SortKey, SortState, TableState, filter_records, paginate,
    sort_records,
};
