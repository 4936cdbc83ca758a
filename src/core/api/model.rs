use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::format_description;

/// Shared ordinal scale for project risk, flag severity and task priority.
///
/// Ordering is the audit scale (low < medium < high < critical), not the
/// lexical order of the labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }

    /// Position on the ordinal scale (low = 0 .. critical = 3).
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Decode a stored token. Unrecognized input falls back to `Low` so a
    /// malformed record still renders.
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "medium" => Severity::Medium,
            "high" => Severity::High,
            "critical" => Severity::Critical,
            _ => Severity::Low,
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Low
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contract sums rendered the way the registry tables show them,
/// e.g. `KES 4.85B` or `KES 890M`.
pub fn format_currency(value: u64) -> String {
    if value >= 1_000_000_000 {
        format!("KES {:.2}B", value as f64 / 1_000_000_000.0)
    } else {
        format!("KES {:.0}M", value as f64 / 1_000_000.0)
    }
}

/// Fixed-locale short date used by the tables, e.g. `26 Jan 2024`.
pub fn format_date(timestamp: OffsetDateTime) -> String {
    let description = format_description!("[day padding:none] [month repr:short] [year]");
    timestamp
        .format(&description)
        .expect("static format description")
}
