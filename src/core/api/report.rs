use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::datetime;

use super::error::ApiResult;
use crate::query::{Filter, SortKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Financial,
    Physical,
    Compliance,
    Summary,
}

impl ReportType {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportType::Financial => "financial",
            ReportType::Physical => "physical",
            ReportType::Compliance => "compliance",
            ReportType::Summary => "summary",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportType::Financial => "Financial",
            ReportType::Physical => "Physical",
            ReportType::Compliance => "Compliance",
            ReportType::Summary => "Summary",
        }
    }

    /// Decode a stored token; unrecognized input falls back to `Summary`.
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "financial" => ReportType::Financial,
            "physical" => ReportType::Physical,
            "compliance" => ReportType::Compliance,
            _ => ReportType::Summary,
        }
    }
}

impl Default for ReportType {
    fn default() -> Self {
        ReportType::Summary
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Draft,
    Submitted,
    Approved,
    Archived,
}

impl ReportStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::Draft => "draft",
            ReportStatus::Submitted => "submitted",
            ReportStatus::Approved => "approved",
            ReportStatus::Archived => "archived",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportStatus::Draft => "Draft",
            ReportStatus::Submitted => "Submitted",
            ReportStatus::Approved => "Approved",
            ReportStatus::Archived => "Archived",
        }
    }

    /// Decode a stored token; unrecognized input falls back to `Draft`.
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "submitted" => ReportStatus::Submitted,
            "approved" => ReportStatus::Approved,
            "archived" => ReportStatus::Archived,
            _ => ReportStatus::Draft,
        }
    }
}

impl Default for ReportStatus {
    fn default() -> Self {
        ReportStatus::Draft
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A produced audit document. `findings` and `recommendations` are counts,
/// not the documents themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub id: String,
    pub project_id: String,
    pub project_name: String,
    pub report_type: ReportType,
    pub title: String,
    pub status: ReportStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub audited_by: String,
    pub findings: u32,
    pub recommendations: u32,
}

pub trait ReportRepository {
    fn get_audit_reports(&self) -> impl Future<Output = ApiResult<Vec<AuditReport>>>;
    fn get_report_by_id(&self, id: &str) -> impl Future<Output = ApiResult<AuditReport>>;
    fn update_report_status(
        &self,
        id: &str,
        status: ReportStatus,
    ) -> impl Future<Output = ApiResult<AuditReport>>;
}

/// Reports page filter. Defaults keep every report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    /// Case-insensitive substring over title, project name and report id.
    pub search: String,
    pub report_type: Option<ReportType>,
    pub status: Option<ReportStatus>,
}

impl Filter<AuditReport> for ReportFilter {
    fn matches(&self, report: &AuditReport) -> bool {
        if !self.search.is_empty() {
            let query = self.search.to_lowercase();
            let hit = report.title.to_lowercase().contains(&query)
                || report.project_name.to_lowercase().contains(&query)
                || report.id.to_lowercase().contains(&query);
            if !hit {
                return false;
            }
        }
        if let Some(report_type) = self.report_type {
            if report.report_type != report_type {
                return false;
            }
        }
        if let Some(status) = self.status {
            if report.status != status {
                return false;
            }
        }
        true
    }

    fn active_count(&self) -> usize {
        usize::from(!self.search.is_empty())
            + usize::from(self.report_type.is_some())
            + usize::from(self.status.is_some())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSortKey {
    Title,
    Status,
    CreatedAt,
    UpdatedAt,
}

impl SortKey<AuditReport> for ReportSortKey {
    fn compare(&self, a: &AuditReport, b: &AuditReport) -> Ordering {
        match self {
            ReportSortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            ReportSortKey::Status => a.status.as_str().cmp(b.status.as_str()),
            ReportSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            ReportSortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

pub(super) fn seed_reports() -> Vec<AuditReport> {
    vec![
        AuditReport {
            id: "RPT-2024-001".to_string(),
            project_id: "PRJ-2024-003".to_string(),
            project_name: "Mombasa Water Supply Phase II".to_string(),
            report_type: ReportType::Financial,
            title: "FY 2023/24 Financial Audit Report - Verified".to_string(),
            status: ReportStatus::Approved,
            created_at: datetime!(2024-01-15 10:00 UTC),
            updated_at: datetime!(2024-01-20 14:30 UTC),
            audited_by: "Audit Officer - SMK".to_string(),
            findings: 0,
            recommendations: 2,
        },
        AuditReport {
            id: "RPT-2024-002".to_string(),
            project_id: "PRJ-2024-001".to_string(),
            project_name: "Nairobi-Thika Highway Expansion Phase III".to_string(),
            report_type: ReportType::Physical,
            title: "Satellite Imagery Physical Verification Report".to_string(),
            status: ReportStatus::Submitted,
            created_at: datetime!(2024-01-22 09:15 UTC),
            updated_at: datetime!(2024-01-25 11:00 UTC),
            audited_by: "Physical Verification Team".to_string(),
            findings: 3,
            recommendations: 5,
        },
        AuditReport {
            id: "RPT-2024-003".to_string(),
            project_id: "PRJ-2024-006".to_string(),
            project_name: "Machakos Technical Training Institute".to_string(),
            report_type: ReportType::Compliance,
            title: "Procurement Compliance Audit - Full Compliance".to_string(),
            status: ReportStatus::Approved,
            created_at: datetime!(2024-01-18 13:45 UTC),
            updated_at: datetime!(2024-01-21 16:20 UTC),
            audited_by: "Compliance Officer - JM".to_string(),
            findings: 0,
            recommendations: 1,
        },
        AuditReport {
            id: "RPT-2024-004".to_string(),
            project_id: "PRJ-2024-010".to_string(),
            project_name: "Isiolo County Hospital Construction".to_string(),
            report_type: ReportType::Physical,
            title: "Physical Progress Verification - Critical Issues".to_string(),
            status: ReportStatus::Submitted,
            created_at: datetime!(2024-01-24 08:30 UTC),
            updated_at: datetime!(2024-01-26 10:15 UTC),
            audited_by: "Physical Verification Team".to_string(),
            findings: 6,
            recommendations: 8,
        },
        AuditReport {
            id: "RPT-2024-005".to_string(),
            project_id: "PRJ-2024-011".to_string(),
            project_name: "Siaya Solar Power Project".to_string(),
            report_type: ReportType::Summary,
            title: "Quarterly Progress Report Q3 2023/24".to_string(),
            status: ReportStatus::Draft,
            created_at: datetime!(2024-01-25 14:00 UTC),
            updated_at: datetime!(2024-01-26 09:00 UTC),
            audited_by: "Senior Auditor - PK".to_string(),
            findings: 2,
            recommendations: 3,
        },
    ]
}
