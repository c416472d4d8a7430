//! API request and response models

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use tracemap_scoring::{ExposureSummary, RiskLevel};

use crate::application::{EmailReport, ModuleReport};

/// Request body for the flagship email analysis
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EmailAnalysisRequest {
    /// Email address to score; `input_value` is accepted as an alias
    #[serde(default, alias = "input_value")]
    #[schema(example = "admin@example.com")]
    pub email: Option<String>,

    /// Caller's acknowledgement that the analysis is authorized
    #[serde(default)]
    #[schema(example = true)]
    pub authorized: bool,

    /// Informational input category sent by the front end
    #[serde(default)]
    #[schema(example = "email")]
    pub input_type: Option<String>,
}

/// Request body for the module endpoints
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ModuleAnalysisRequest {
    /// Identifier to score; defaults to `forensic_stream`
    #[serde(default)]
    #[schema(example = "admin_root_user")]
    pub input_value: Option<String>,

    #[serde(default)]
    #[schema(example = true)]
    pub authorized: bool,
}

/// Flagship analysis result
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmailAnalysisResponse {
    /// Address as submitted (unmasked)
    #[schema(example = "admin@example.com")]
    pub email: String,

    #[schema(example = 6.0)]
    pub risk_score: f64,

    pub risk_level: RiskLevel,

    pub exposure_summary: ExposureSummary,

    /// Natural-language explanation bullets
    pub ai_explanation: Vec<String>,

    pub recommendations: Vec<String>,

    #[schema(example = "Simulated public data for educational purposes only.")]
    pub disclaimer: String,
}

impl From<EmailReport> for EmailAnalysisResponse {
    fn from(report: EmailReport) -> Self {
        Self {
            email: report.email,
            risk_score: report.analysis.final_score,
            risk_level: report.analysis.risk_level,
            exposure_summary: report.exposure_summary,
            ai_explanation: report.ai_explanation,
            recommendations: report.recommendations,
            disclaimer: report.disclaimer,
        }
    }
}

/// Module analysis result
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModuleAnalysisResponse {
    /// Caller's `input_value`, omitted when none was sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    #[schema(example = 4.5)]
    pub risk_score: f64,

    pub risk_level: RiskLevel,

    /// Fixed module-specific categories
    #[schema(example = json!({"public_mentions": "Simulated", "platform_reuse": "Detected"}))]
    pub exposure_summary: BTreeMap<String, String>,

    pub ai_explanation: Vec<String>,

    pub recommendations: Vec<String>,

    #[schema(example = "Simulated data for education.")]
    pub disclaimer: String,
}

impl From<ModuleReport> for ModuleAnalysisResponse {
    fn from(report: ModuleReport) -> Self {
        Self {
            input: report.input,
            risk_score: report.score.final_score,
            risk_level: report.score.risk_level,
            exposure_summary: report.exposure_summary,
            ai_explanation: report.ai_explanation,
            recommendations: report.recommendations,
            disclaimer: report.disclaimer,
        }
    }
}

/// Minimal body returned when the flagship handler fails unexpectedly
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FallbackAnalysisResponse {
    #[schema(example = 1.0)]
    pub risk_score: f64,
    pub risk_level: RiskLevel,
}

impl Default for FallbackAnalysisResponse {
    fn default() -> Self {
        Self {
            risk_score: 1.0,
            risk_level: RiskLevel::Low,
        }
    }
}

/// Error response model
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    #[schema(example = "Authorization required")]
    pub error: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,

    #[schema(example = "0.3.0")]
    pub version: String,

    #[schema(example = "2026-01-15T10:30:00Z")]
    pub timestamp: DateTime<Utc>,

    /// Identifier of the configured explanation provider
    #[schema(example = "google_ai")]
    pub llm_provider: String,
}
