use serde::{Deserialize, Serialize};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

use super::error::ApiResult;
use super::model::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Blocked,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Blocked => "blocked",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Blocked => "Blocked",
        }
    }

    /// Decode a stored token; unrecognized input falls back to `Pending`.
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "in-progress" | "in progress" => TaskStatus::InProgress,
            "completed" => TaskStatus::Completed,
            "blocked" => TaskStatus::Blocked,
            _ => TaskStatus::Pending,
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A workbench assignment: one verification job against one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditTask {
    pub id: String,
    pub project_id: String,
    pub project_name: String,
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub priority: Severity,
    pub status: TaskStatus,
    pub due_date: Date,
    pub created_at: OffsetDateTime,
    pub evidence_count: u32,
}

pub trait TaskRepository {
    fn get_audit_tasks(&self) -> impl Future<Output = ApiResult<Vec<AuditTask>>>;
    fn update_task_status(
        &self,
        id: &str,
        status: TaskStatus,
    ) -> impl Future<Output = ApiResult<AuditTask>>;
    fn get_tasks_by_project(
        &self,
        project_id: &str,
    ) -> impl Future<Output = ApiResult<Vec<AuditTask>>>;
}

pub(super) fn seed_tasks() -> Vec<AuditTask> {
    vec![
        AuditTask {
            id: "TASK-001".to_string(),
            project_id: "PRJ-2024-001".to_string(),
            project_name: "Nairobi-Thika Highway Expansion Phase III".to_string(),
            title: "Verify contract terms and conditions".to_string(),
            description: "Review and verify all contract amendments and variations against \
                          budget allocations."
                .to_string(),
            assigned_to: "Audit Officer - SMK".to_string(),
            priority: Severity::High,
            status: TaskStatus::InProgress,
            due_date: date!(2024 - 02 - 05),
            created_at: datetime!(2024-01-20 08:00 UTC),
            evidence_count: 8,
        },
        AuditTask {
            id: "TASK-002".to_string(),
            project_id: "PRJ-2024-010".to_string(),
            project_name: "Isiolo County Hospital Construction".to_string(),
            title: "Investigate project stall".to_string(),
            description: "Conduct site inspection and interview project management on reasons \
                          for project halt."
                .to_string(),
            assigned_to: "Senior Auditor - PK".to_string(),
            priority: Severity::Critical,
            status: TaskStatus::Pending,
            due_date: date!(2024 - 01 - 30),
            created_at: datetime!(2024-01-24 14:30 UTC),
            evidence_count: 2,
        },
        AuditTask {
            id: "TASK-003".to_string(),
            project_id: "PRJ-2024-004".to_string(),
            project_name: "Eldoret Bypass Construction".to_string(),
            title: "Analyze tender submissions".to_string(),
            description: "Review and analyze all tender submissions for lowball prices and \
                          potential collusion."
                .to_string(),
            assigned_to: "Compliance Officer - JM".to_string(),
            priority: Severity::High,
            status: TaskStatus::InProgress,
            due_date: date!(2024 - 02 - 08),
            created_at: datetime!(2024-01-22 10:00 UTC),
            evidence_count: 15,
        },
        AuditTask {
            id: "TASK-004".to_string(),
            project_id: "PRJ-2024-002".to_string(),
            project_name: "Kisumu Port Rehabilitation Project".to_string(),
            title: "Reconcile invoices to purchase orders".to_string(),
            description: "Match all supplier invoices against procurement records and payment \
                          vouchers."
                .to_string(),
            assigned_to: "Audit Officer - MN".to_string(),
            priority: Severity::Medium,
            status: TaskStatus::Completed,
            due_date: date!(2024 - 01 - 25),
            created_at: datetime!(2024-01-15 09:00 UTC),
            evidence_count: 22,
        },
        AuditTask {
            id: "TASK-005".to_string(),
            project_id: "PRJ-2024-008".to_string(),
            project_name: "Nairobi JKIA Terminal 3 Expansion".to_string(),
            title: "Review contractor credentials".to_string(),
            description: "Verify contractor licensing, insurance coverage, and past project \
                          performance records."
                .to_string(),
            assigned_to: "Audit Officer - SMK".to_string(),
            priority: Severity::High,
            status: TaskStatus::Pending,
            due_date: date!(2024 - 02 - 02),
            created_at: datetime!(2024-01-23 11:30 UTC),
            evidence_count: 5,
        },
    ]
}
