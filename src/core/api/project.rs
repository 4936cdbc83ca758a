use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

use super::error::ApiResult;
use super::model::Severity;
use crate::query::{Filter, SortKey};

/// Delivery status shown in the registry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    OnTrack,
    AtRisk,
    Completed,
    OnHold,
    Investigation,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::OnTrack => "on-track",
            ProjectStatus::AtRisk => "at-risk",
            ProjectStatus::Completed => "completed",
            ProjectStatus::OnHold => "on-hold",
            ProjectStatus::Investigation => "investigation",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::OnTrack => "On Track",
            ProjectStatus::AtRisk => "At Risk",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::OnHold => "On Hold",
            ProjectStatus::Investigation => "Investigation",
        }
    }

    /// Decode a stored token; unrecognized input falls back to `OnTrack`.
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "at-risk" | "at risk" => ProjectStatus::AtRisk,
            "completed" => ProjectStatus::Completed,
            "on-hold" | "on hold" => ProjectStatus::OnHold,
            "investigation" => ProjectStatus::Investigation,
            _ => ProjectStatus::OnTrack,
        }
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::OnTrack
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a project sits in the audit workflow. The upstream registry keeps
/// this as a free-form string (sometimes annotated, e.g.
/// `"Flagged - Lowball Tender"`); here it is a closed set with a decode
/// step so badge rendering never meets an unknown value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditStatus {
    Verified,
    UnderReview,
    PendingVerification,
    PhysicalVerificationRequired,
    Flagged,
    Investigation,
}

impl AuditStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditStatus::Verified => "verified",
            AuditStatus::UnderReview => "under-review",
            AuditStatus::PendingVerification => "pending-verification",
            AuditStatus::PhysicalVerificationRequired => "physical-verification-required",
            AuditStatus::Flagged => "flagged",
            AuditStatus::Investigation => "investigation",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AuditStatus::Verified => "Verified",
            AuditStatus::UnderReview => "Under Review",
            AuditStatus::PendingVerification => "Pending Verification",
            AuditStatus::PhysicalVerificationRequired => "Physical Verification Required",
            AuditStatus::Flagged => "Flagged",
            AuditStatus::Investigation => "Investigation",
        }
    }

    /// Decode a stored label. Annotated flag labels map to `Flagged` by
    /// prefix; anything unrecognized falls back to `PendingVerification`.
    pub fn from_label(value: &str) -> Self {
        let token = value.trim().to_lowercase();
        if token.starts_with("flagged") {
            return AuditStatus::Flagged;
        }
        match token.as_str() {
            "verified" => AuditStatus::Verified,
            "under-review" | "under review" => AuditStatus::UnderReview,
            "physical-verification-required" | "physical verification required" => {
                AuditStatus::PhysicalVerificationRequired
            }
            "investigation" => AuditStatus::Investigation,
            _ => AuditStatus::PendingVerification,
        }
    }
}

impl Default for AuditStatus {
    fn default() -> Self {
        AuditStatus::PendingVerification
    }
}

impl std::fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contract milestone. Owned by its project, never shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub name: String,
    pub completed: bool,
    pub due_date: Option<Date>,
}

/// One monitored development project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub county: String,
    pub sector: String,
    pub contract_sum: u64,
    pub amount_paid: u64,
    pub risk_level: Severity,
    pub audit_status: AuditStatus,
    pub entity: String,
    pub last_updated: OffsetDateTime,
    pub status: ProjectStatus,
    pub milestones: Vec<Milestone>,
}

impl Project {
    /// Completed milestones out of the total, for progress rendering.
    pub fn milestone_progress(&self) -> (usize, usize) {
        let completed = self
            .milestones
            .iter()
            .filter(|milestone| milestone.completed)
            .count();
        (completed, self.milestones.len())
    }
}

/// Partial edit applied over an existing project record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub county: Option<String>,
    pub sector: Option<String>,
    pub contract_sum: Option<u64>,
    pub amount_paid: Option<u64>,
    pub risk_level: Option<Severity>,
    pub audit_status: Option<AuditStatus>,
    pub entity: Option<String>,
    pub status: Option<ProjectStatus>,
    pub milestones: Option<Vec<Milestone>>,
}

impl ProjectUpdate {
    /// Build the edited copy: requested fields overwritten, `last_updated`
    /// refreshed. The input record is consumed, not mutated in place.
    pub(super) fn apply(self, project: Project) -> Project {
        Project {
            name: self.name.unwrap_or(project.name),
            county: self.county.unwrap_or(project.county),
            sector: self.sector.unwrap_or(project.sector),
            contract_sum: self.contract_sum.unwrap_or(project.contract_sum),
            amount_paid: self.amount_paid.unwrap_or(project.amount_paid),
            risk_level: self.risk_level.unwrap_or(project.risk_level),
            audit_status: self.audit_status.unwrap_or(project.audit_status),
            entity: self.entity.unwrap_or(project.entity),
            status: self.status.unwrap_or(project.status),
            milestones: self.milestones.unwrap_or(project.milestones),
            last_updated: OffsetDateTime::now_utc(),
            id: project.id,
        }
    }
}

pub trait ProjectRepository {
    fn get_projects(&self) -> impl Future<Output = ApiResult<Vec<Project>>>;
    fn get_project_by_id(&self, id: &str) -> impl Future<Output = ApiResult<Project>>;
    fn update_project(
        &self,
        id: &str,
        update: ProjectUpdate,
    ) -> impl Future<Output = ApiResult<Project>>;
}

/// Registry filter panel state. Every field is a no-op at its default, so
/// the default descriptor keeps every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilter {
    /// Case-insensitive substring over name, id and implementing entity.
    pub search: String,
    /// Matched with `contains` semantics: composite county strings such as
    /// `"Nairobi / Kiambu"` still match a single-county selection.
    pub county: Option<String>,
    pub sector: Option<String>,
    pub risk_level: Option<Severity>,
    pub audit_status: Option<AuditStatus>,
    pub status: Option<ProjectStatus>,
}

impl Filter<Project> for ProjectFilter {
    fn matches(&self, project: &Project) -> bool {
        if !self.search.is_empty() {
            let query = self.search.to_lowercase();
            let hit = project.name.to_lowercase().contains(&query)
                || project.id.to_lowercase().contains(&query)
                || project.entity.to_lowercase().contains(&query);
            if !hit {
                return false;
            }
        }
        if let Some(county) = &self.county {
            if !project.county.contains(county.as_str()) {
                return false;
            }
        }
        if let Some(sector) = &self.sector {
            if project.sector != *sector {
                return false;
            }
        }
        if let Some(risk_level) = self.risk_level {
            if project.risk_level != risk_level {
                return false;
            }
        }
        if let Some(audit_status) = self.audit_status {
            if project.audit_status != audit_status {
                return false;
            }
        }
        if let Some(status) = self.status {
            if project.status != status {
                return false;
            }
        }
        true
    }

    fn active_count(&self) -> usize {
        usize::from(!self.search.is_empty())
            + usize::from(self.county.is_some())
            + usize::from(self.sector.is_some())
            + usize::from(self.risk_level.is_some())
            + usize::from(self.audit_status.is_some())
            + usize::from(self.status.is_some())
    }
}

/// Sortable registry columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectSortKey {
    Name,
    Status,
    RiskLevel,
    LastUpdated,
}

impl SortKey<Project> for ProjectSortKey {
    fn compare(&self, a: &Project, b: &Project) -> Ordering {
        match self {
            ProjectSortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            ProjectSortKey::Status => a.status.as_str().cmp(b.status.as_str()),
            ProjectSortKey::RiskLevel => a.risk_level.cmp(&b.risk_level),
            ProjectSortKey::LastUpdated => a.last_updated.cmp(&b.last_updated),
        }
    }
}

fn milestone(id: &str, name: &str, completed: bool, due_date: Date) -> Milestone {
    Milestone {
        id: id.to_string(),
        name: name.to_string(),
        completed,
        due_date: Some(due_date),
    }
}

pub(super) fn seed_projects() -> Vec<Project> {
    vec![
        Project {
            id: "PRJ-2024-001".to_string(),
            name: "Nairobi-Thika Highway Expansion Phase III".to_string(),
            county: "Nairobi".to_string(),
            sector: "Roads & Transport".to_string(),
            contract_sum: 4_850_000_000,
            amount_paid: 3_420_000_000,
            risk_level: Severity::Critical,
            audit_status: AuditStatus::UnderReview,
            entity: "Kenya National Highways Authority".to_string(),
            last_updated: datetime!(2024-01-26 14:00 UTC),
            status: ProjectStatus::AtRisk,
            milestones: vec![
                milestone("M1", "Phase 1 Excavation", true, date!(2023 - 06 - 30)),
                milestone("M2", "Foundation Work", true, date!(2023 - 12 - 31)),
                milestone("M3", "Asphalt Laying", false, date!(2024 - 06 - 30)),
                milestone("M4", "Final Inspection", false, date!(2024 - 12 - 31)),
                milestone("M5", "Project Handover", false, date!(2025 - 03 - 31)),
            ],
        },
        Project {
            id: "PRJ-2024-002".to_string(),
            name: "Kisumu Port Rehabilitation Project".to_string(),
            county: "Kisumu".to_string(),
            sector: "Transport".to_string(),
            contract_sum: 2_100_000_000,
            amount_paid: 890_000_000,
            risk_level: Severity::Medium,
            audit_status: AuditStatus::PendingVerification,
            entity: "Kenya Ports Authority".to_string(),
            last_updated: datetime!(2024-01-25 10:30 UTC),
            status: ProjectStatus::OnTrack,
            milestones: vec![
                milestone("M1", "Facility Assessment", true, date!(2023 - 09 - 30)),
                milestone("M2", "Procurement Process", true, date!(2024 - 01 - 31)),
                milestone("M3", "Installation", false, date!(2024 - 08 - 31)),
            ],
        },
        Project {
            id: "PRJ-2024-003".to_string(),
            name: "Mombasa Water Supply Phase II".to_string(),
            county: "Mombasa".to_string(),
            sector: "Water & Sanitation".to_string(),
            contract_sum: 1_580_000_000,
            amount_paid: 1_240_000_000,
            risk_level: Severity::Low,
            audit_status: AuditStatus::Verified,
            entity: "Mombasa Water & Sewerage Co.".to_string(),
            last_updated: datetime!(2024-01-24 09:15 UTC),
            status: ProjectStatus::Completed,
            milestones: vec![
                milestone("M1", "Design Review", true, date!(2023 - 03 - 31)),
                milestone("M2", "Pipeline Construction", true, date!(2023 - 11 - 30)),
                milestone("M3", "System Testing", true, date!(2024 - 01 - 15)),
                milestone("M4", "Handover", true, date!(2024 - 01 - 20)),
            ],
        },
        Project {
            id: "PRJ-2024-004".to_string(),
            name: "Eldoret Bypass Construction".to_string(),
            county: "Uasin Gishu".to_string(),
            sector: "Roads & Transport".to_string(),
            contract_sum: 6_200_000_000,
            amount_paid: 1_850_000_000,
            risk_level: Severity::High,
            audit_status: AuditStatus::Flagged,
            entity: "Kenya National Highways Authority".to_string(),
            last_updated: datetime!(2024-01-23 16:45 UTC),
            status: ProjectStatus::OnHold,
            milestones: vec![
                milestone("M1", "Site Mobilization", true, date!(2023 - 10 - 31)),
                milestone("M2", "Excavation", false, date!(2024 - 06 - 30)),
                milestone("M3", "Foundation Pilling", false, date!(2024 - 09 - 30)),
            ],
        },
        Project {
            id: "PRJ-2024-005".to_string(),
            name: "Garissa County Hospital Upgrade".to_string(),
            county: "Garissa".to_string(),
            sector: "Health".to_string(),
            contract_sum: 890_000_000,
            amount_paid: 445_000_000,
            risk_level: Severity::Medium,
            audit_status: AuditStatus::PhysicalVerificationRequired,
            entity: "Ministry of Health".to_string(),
            last_updated: datetime!(2024-01-22 11:20 UTC),
            status: ProjectStatus::AtRisk,
            milestones: vec![
                milestone("M1", "Blueprint Finalization", true, date!(2023 - 08 - 31)),
                milestone("M2", "Construction Phase 1", true, date!(2024 - 01 - 31)),
                milestone("M3", "Equipment Installation", false, date!(2024 - 06 - 30)),
            ],
        },
        Project {
            id: "PRJ-2024-006".to_string(),
            name: "Machakos Technical Training Institute".to_string(),
            county: "Machakos".to_string(),
            sector: "Education".to_string(),
            contract_sum: 520_000_000,
            amount_paid: 468_000_000,
            risk_level: Severity::Low,
            audit_status: AuditStatus::Verified,
            entity: "Ministry of Education".to_string(),
            last_updated: datetime!(2024-01-21 13:00 UTC),
            status: ProjectStatus::Completed,
            milestones: vec![
                milestone("M1", "Site Preparation", true, date!(2023 - 05 - 31)),
                milestone("M2", "Building Construction", true, date!(2023 - 11 - 30)),
                milestone("M3", "Furnishing", true, date!(2024 - 01 - 15)),
            ],
        },
        Project {
            id: "PRJ-2024-007".to_string(),
            name: "Kakamega County Road Network Upgrade".to_string(),
            county: "Kakamega".to_string(),
            sector: "Roads & Transport".to_string(),
            contract_sum: 1_250_000_000,
            amount_paid: 750_000_000,
            risk_level: Severity::Medium,
            audit_status: AuditStatus::UnderReview,
            entity: "Kenya Rural Roads Authority".to_string(),
            last_updated: datetime!(2024-01-20 08:30 UTC),
            status: ProjectStatus::OnTrack,
            milestones: vec![
                milestone("M1", "Survey & Design", true, date!(2023 - 09 - 30)),
                milestone("M2", "Road Rehabilitation", true, date!(2024 - 02 - 28)),
                milestone("M3", "Drainage Works", false, date!(2024 - 05 - 31)),
            ],
        },
        Project {
            id: "PRJ-2024-008".to_string(),
            name: "Nairobi JKIA Terminal 3 Expansion".to_string(),
            county: "Nairobi".to_string(),
            sector: "Transport".to_string(),
            contract_sum: 18_500_000_000,
            amount_paid: 8_200_000_000,
            risk_level: Severity::High,
            audit_status: AuditStatus::UnderReview,
            entity: "Jomo Kenyatta International Airport".to_string(),
            last_updated: datetime!(2024-01-19 15:45 UTC),
            status: ProjectStatus::AtRisk,
            milestones: vec![
                milestone("M1", "Design Phase", true, date!(2023 - 12 - 31)),
                milestone("M2", "Tender Process", false, date!(2024 - 03 - 31)),
                milestone("M3", "Construction Phase 1", false, date!(2024 - 12 - 31)),
                milestone("M4", "Infrastructure Setup", false, date!(2025 - 06 - 30)),
            ],
        },
        Project {
            id: "PRJ-2024-009".to_string(),
            name: "Kilifi County Water Infrastructure".to_string(),
            county: "Kilifi".to_string(),
            sector: "Water & Sanitation".to_string(),
            contract_sum: 780_000_000,
            amount_paid: 620_000_000,
            risk_level: Severity::Low,
            audit_status: AuditStatus::Verified,
            entity: "Kilifi County Government".to_string(),
            last_updated: datetime!(2024-01-18 12:15 UTC),
            status: ProjectStatus::Completed,
            milestones: vec![
                milestone("M1", "Borehole Drilling", true, date!(2023 - 07 - 31)),
                milestone("M2", "Tank Construction", true, date!(2023 - 10 - 31)),
                milestone("M3", "Distribution Network", true, date!(2024 - 01 - 15)),
            ],
        },
        Project {
            id: "PRJ-2024-010".to_string(),
            name: "Isiolo County Hospital Construction".to_string(),
            county: "Isiolo".to_string(),
            sector: "Health".to_string(),
            contract_sum: 450_000_000,
            amount_paid: 180_000_000,
            risk_level: Severity::Critical,
            audit_status: AuditStatus::Investigation,
            entity: "Ministry of Health".to_string(),
            last_updated: datetime!(2024-01-17 10:00 UTC),
            status: ProjectStatus::Investigation,
            milestones: vec![
                milestone("M1", "Project Planning", true, date!(2023 - 08 - 31)),
                milestone("M2", "Construction Start", true, date!(2023 - 11 - 30)),
                milestone("M3", "Structural Work", false, date!(2024 - 06 - 30)),
            ],
        },
        Project {
            id: "PRJ-2024-011".to_string(),
            name: "Siaya Solar Power Project".to_string(),
            county: "Siaya".to_string(),
            sector: "Energy".to_string(),
            contract_sum: 3_200_000_000,
            amount_paid: 1_600_000_000,
            risk_level: Severity::Medium,
            audit_status: AuditStatus::PendingVerification,
            entity: "Kenya Electricity Generating Company".to_string(),
            last_updated: datetime!(2024-01-16 14:30 UTC),
            status: ProjectStatus::OnTrack,
            milestones: vec![
                milestone("M1", "Site Selection", true, date!(2023 - 09 - 30)),
                milestone("M2", "Equipment Procurement", true, date!(2024 - 01 - 31)),
                milestone("M3", "Installation", false, date!(2024 - 06 - 30)),
            ],
        },
        Project {
            id: "PRJ-2024-012".to_string(),
            name: "Nyeri County Agricultural Development".to_string(),
            county: "Nyeri".to_string(),
            sector: "Agriculture".to_string(),
            contract_sum: 350_000_000,
            amount_paid: 280_000_000,
            risk_level: Severity::Low,
            audit_status: AuditStatus::Verified,
            entity: "Ministry of Agriculture".to_string(),
            last_updated: datetime!(2024-01-15 09:45 UTC),
            status: ProjectStatus::Completed,
            milestones: vec![
                milestone("M1", "Training Programs", true, date!(2023 - 10 - 31)),
                milestone("M2", "Equipment Distribution", true, date!(2024 - 01 - 10)),
                milestone("M3", "Impact Assessment", true, date!(2024 - 01 - 20)),
            ],
        },
    ]
}
