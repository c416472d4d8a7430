//! Risk level classification shared by both scoring formulas

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Upper bound of every risk score
pub const MAX_RISK_SCORE: f64 = 10.0;

/// Step classification of a risk score.
///
/// Bands are inclusive-lower, exclusive-upper; `Critical` is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// score < 2.5
    Low,
    /// 2.5 <= score < 5.0
    Medium,
    /// 5.0 <= score < 7.5
    High,
    /// score >= 7.5
    Critical,
}

impl RiskLevel {
    pub const MEDIUM_THRESHOLD: f64 = 2.5;
    pub const HIGH_THRESHOLD: f64 = 5.0;
    pub const CRITICAL_THRESHOLD: f64 = 7.5;

    /// Classify a numeric score.
    pub fn from_score(score: f64) -> Self {
        if score >= Self::CRITICAL_THRESHOLD {
            RiskLevel::Critical
        } else if score >= Self::HIGH_THRESHOLD {
            RiskLevel::High
        } else if score >= Self::MEDIUM_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
