use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::datetime;

use super::error::ApiResult;

/// Headline figures for the dashboard KPI cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiData {
    pub projects_monitored: u32,
    pub high_risk_projects: u32,
    pub funds_disbursed: u64,
    pub verified_progress: u64,
    pub last_updated: OffsetDateTime,
}

/// One slice of a category-breakdown series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub label: String,
    pub value: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ChartPoint {
    fn new(label: &str, value: u32, category: Option<&str>) -> Self {
        ChartPoint {
            label: label.to_string(),
            value,
            category: category.map(str::to_string),
        }
    }
}

/// Snapshot aggregate behind the dashboard. Re-fetched wholesale, never
/// patched field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub kpis: KpiData,
    pub audit_progress: Vec<ChartPoint>,
    pub sector_breakdown: Vec<ChartPoint>,
    pub risk_summary: Vec<ChartPoint>,
}

pub trait MetricsRepository {
    fn get_dashboard_metrics(&self) -> impl Future<Output = ApiResult<DashboardMetrics>>;
}

pub(super) fn seed_metrics() -> DashboardMetrics {
    DashboardMetrics {
        kpis: KpiData {
            projects_monitored: 392,
            high_risk_projects: 47,
            funds_disbursed: 52_800_000_000,
            verified_progress: 44_200_000_000,
            last_updated: datetime!(2024-01-26 14:00 UTC),
        },
        audit_progress: vec![
            ChartPoint::new("Verified", 45, Some("verified")),
            ChartPoint::new("Under Review", 30, Some("review")),
            ChartPoint::new("Pending", 15, Some("pending")),
            ChartPoint::new("Flagged", 10, Some("flagged")),
        ],
        sector_breakdown: vec![
            ChartPoint::new("Roads & Transport", 35, None),
            ChartPoint::new("Water & Sanitation", 20, None),
            ChartPoint::new("Health", 18, None),
            ChartPoint::new("Education", 15, None),
            ChartPoint::new("Energy", 12, None),
        ],
        risk_summary: vec![
            ChartPoint::new("Low Risk", 250, Some("low")),
            ChartPoint::new("Medium Risk", 85, Some("medium")),
            ChartPoint::new("High Risk", 42, Some("high")),
            ChartPoint::new("Critical", 15, Some("critical")),
        ],
    }
}
