use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::datetime;

use super::error::ApiResult;
use super::model::Severity;
use crate::query::{Filter, SortKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagStatus {
    Open,
    Investigating,
    Resolved,
}

impl FlagStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FlagStatus::Open => "open",
            FlagStatus::Investigating => "investigating",
            FlagStatus::Resolved => "resolved",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FlagStatus::Open => "Open",
            FlagStatus::Investigating => "Investigating",
            FlagStatus::Resolved => "Resolved",
        }
    }

    /// Decode a stored token; unrecognized input falls back to `Open`.
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "investigating" => FlagStatus::Investigating,
            "resolved" => FlagStatus::Resolved,
            _ => FlagStatus::Open,
        }
    }
}

impl Default for FlagStatus {
    fn default() -> Self {
        FlagStatus::Open
    }
}

impl std::fmt::Display for FlagStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raised audit concern against a project. `project_name` and `county`
/// are denormalized copies so the alerts board renders without a join;
/// `project_id` is lookup-only and may dangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditFlag {
    pub id: String,
    pub project_id: String,
    pub project_name: String,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub created_at: OffsetDateTime,
    pub status: FlagStatus,
    pub county: String,
}

pub trait FlagRepository {
    fn get_audit_flags(&self) -> impl Future<Output = ApiResult<Vec<AuditFlag>>>;
    fn get_audit_flag_by_id(&self, id: &str) -> impl Future<Output = ApiResult<AuditFlag>>;
    fn update_audit_flag_status(
        &self,
        id: &str,
        status: FlagStatus,
    ) -> impl Future<Output = ApiResult<AuditFlag>>;
}

/// Alerts board filter. Defaults keep every flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagFilter {
    /// Case-insensitive substring over title, project name and flag id.
    pub search: String,
    pub severity: Option<Severity>,
    pub status: Option<FlagStatus>,
    pub county: Option<String>,
}

impl Filter<AuditFlag> for FlagFilter {
    fn matches(&self, flag: &AuditFlag) -> bool {
        if !self.search.is_empty() {
            let query = self.search.to_lowercase();
            let hit = flag.title.to_lowercase().contains(&query)
                || flag.project_name.to_lowercase().contains(&query)
                || flag.id.to_lowercase().contains(&query);
            if !hit {
                return false;
            }
        }
        if let Some(severity) = self.severity {
            if flag.severity != severity {
                return false;
            }
        }
        if let Some(status) = self.status {
            if flag.status != status {
                return false;
            }
        }
        if let Some(county) = &self.county {
            if !flag.county.contains(county.as_str()) {
                return false;
            }
        }
        true
    }

    fn active_count(&self) -> usize {
        usize::from(!self.search.is_empty())
            + usize::from(self.severity.is_some())
            + usize::from(self.status.is_some())
            + usize::from(self.county.is_some())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagSortKey {
    CreatedAt,
    Severity,
}

impl SortKey<AuditFlag> for FlagSortKey {
    fn compare(&self, a: &AuditFlag, b: &AuditFlag) -> Ordering {
        match self {
            FlagSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            FlagSortKey::Severity => a.severity.cmp(&b.severity),
        }
    }
}

/// KPI strip over a loaded flag list: high-priority means critical or high.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagTally {
    pub high_priority: usize,
    pub open: usize,
    pub investigating: usize,
    pub resolved: usize,
}

impl FlagTally {
    pub fn from_flags(flags: &[AuditFlag]) -> Self {
        let mut tally = FlagTally::default();
        for flag in flags {
            if flag.severity >= Severity::High {
                tally.high_priority += 1;
            }
            match flag.status {
                FlagStatus::Open => tally.open += 1,
                FlagStatus::Investigating => tally.investigating += 1,
                FlagStatus::Resolved => tally.resolved += 1,
            }
        }
        tally
    }
}

pub(super) fn seed_flags() -> Vec<AuditFlag> {
    vec![
        AuditFlag {
            id: "FLAG-001".to_string(),
            project_id: "PRJ-2024-001".to_string(),
            project_name: "Nairobi-Thika Highway Expansion Phase III".to_string(),
            severity: Severity::Critical,
            title: "Significant burn rate mismatch".to_string(),
            description: "Disbursed funds (KES 3.42B) exceed completed work progress by 32%. \
                          Immediate investigation required."
                .to_string(),
            created_at: datetime!(2024-01-26 10:30 UTC),
            status: FlagStatus::Investigating,
            county: "Nairobi".to_string(),
        },
        AuditFlag {
            id: "FLAG-002".to_string(),
            project_id: "PRJ-2024-004".to_string(),
            project_name: "Eldoret Bypass Construction".to_string(),
            severity: Severity::High,
            title: "Lowball tender alert".to_string(),
            description: "Contract sum significantly below market rate for comparable projects. \
                          Requires due diligence review."
                .to_string(),
            created_at: datetime!(2024-01-25 14:15 UTC),
            status: FlagStatus::Open,
            county: "Uasin Gishu".to_string(),
        },
        AuditFlag {
            id: "FLAG-003".to_string(),
            project_id: "PRJ-2024-010".to_string(),
            project_name: "Isiolo County Hospital Construction".to_string(),
            severity: Severity::Critical,
            title: "Project stalled - no progress in 6 months".to_string(),
            description: "Physical verification shows zero progress since last audit. Only 40% \
                          of allocated budget disbursed."
                .to_string(),
            created_at: datetime!(2024-01-24 09:00 UTC),
            status: FlagStatus::Investigating,
            county: "Isiolo".to_string(),
        },
        AuditFlag {
            id: "FLAG-004".to_string(),
            project_id: "PRJ-2024-002".to_string(),
            project_name: "Kisumu Port Rehabilitation Project".to_string(),
            severity: Severity::Medium,
            title: "Documentation discrepancy".to_string(),
            description: "Supplier invoices do not match procurement records. Awaiting \
                          clarification from implementing entity."
                .to_string(),
            created_at: datetime!(2024-01-23 11:45 UTC),
            status: FlagStatus::Open,
            county: "Kisumu".to_string(),
        },
        AuditFlag {
            id: "FLAG-005".to_string(),
            project_id: "PRJ-2024-008".to_string(),
            project_name: "Nairobi JKIA Terminal 3 Expansion".to_string(),
            severity: Severity::High,
            title: "Delayed contractor certification".to_string(),
            description: "Prime contractor certification pending. Potential conflict of \
                          interest identified with subcontractor."
                .to_string(),
            created_at: datetime!(2024-01-22 16:20 UTC),
            status: FlagStatus::Open,
            county: "Nairobi".to_string(),
        },
    ]
}
