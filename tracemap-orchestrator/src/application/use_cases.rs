//! Orchestrator use cases

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use tracemap_llm::ExplainRiskUseCase;
use tracemap_llm::prompts::PromptBuilder;
use tracemap_scoring::{
    EmailAnalysis, ExposureSummary, ModuleScore, ModuleType, mask_email, score_email, score_module,
};

use crate::application::errors::AnalysisError;

/// Input scored by module endpoints when the caller sends none
pub const DEFAULT_MODULE_INPUT: &str = "forensic_stream";

pub const EMAIL_EXPLANATION_LINES: usize = 6;
pub const MODULE_EXPLANATION_LINES: usize = 4;

pub const EMAIL_FALLBACK_EXPLANATION: [&str; 3] = [
    "Analyzing digital footprints...",
    "Mapping platform reuse signals...",
    "Calculating metadata visibility...",
];

pub const EMAIL_RECOMMENDATIONS: [&str; 3] = [
    "Review privacy settings",
    "Avoid email reuse",
    "Monitor exposure",
];

pub const EMAIL_DISCLAIMER: &str = "Simulated public data for educational purposes only.";
pub const MODULE_DISCLAIMER: &str = "Simulated data for education.";

/// Canned explanation for a module when the explanation service fails
pub fn module_fallback_explanation(module: ModuleType) -> Vec<String> {
    vec![
        format!(
            "The {} analysis has identified deterministic patterns in public footprints.",
            module
        ),
        "Educational awareness of these vectors is recommended for privacy.".to_string(),
    ]
}

/// Fully assembled flagship result
#[derive(Debug, Clone)]
pub struct EmailReport {
    pub email: String,
    pub analysis: EmailAnalysis,
    pub exposure_summary: ExposureSummary,
    pub ai_explanation: Vec<String>,
    pub recommendations: Vec<String>,
    pub disclaimer: String,
}

/// Fully assembled module result
#[derive(Debug, Clone)]
pub struct ModuleReport {
    pub module: ModuleType,
    /// Caller's input as sent, not the defaulted value
    pub input: Option<String>,
    pub score: ModuleScore,
    pub exposure_summary: BTreeMap<String, String>,
    pub ai_explanation: Vec<String>,
    pub recommendations: Vec<String>,
    pub disclaimer: String,
}

/// Ask for an explanation once; any failure yields `fallback`.
async fn explain_or_fallback(
    explainer: &ExplainRiskUseCase,
    prompt: &str,
    max_lines: usize,
    fallback: impl FnOnce() -> Vec<String>,
) -> Vec<String> {
    match explainer.execute(prompt, max_lines).await {
        Ok(lines) => lines,
        Err(e) => {
            warn!(error = %e, "Explanation unavailable, using fallback text");
            fallback()
        }
    }
}

/// Use case behind `POST /analyze-email`
pub struct AnalyzeEmailUseCase {
    explainer: Arc<ExplainRiskUseCase>,
}

impl AnalyzeEmailUseCase {
    pub fn new(explainer: Arc<ExplainRiskUseCase>) -> Self {
        Self { explainer }
    }

    pub async fn execute(&self, email: &str, authorized: bool) -> Result<EmailReport, AnalysisError> {
        if !authorized {
            return Err(AnalysisError::Unauthorized);
        }

        let analysis = score_email(email)?;
        debug!(
            final_score = analysis.final_score,
            risk_level = %analysis.risk_level,
            internal_score = analysis.signals.internal_score(),
            "Email scored"
        );

        let masked = mask_email(email);
        let prompt = PromptBuilder::build_email_prompt(
            &masked,
            analysis.final_score,
            analysis.risk_level.as_str(),
        );

        let ai_explanation =
            explain_or_fallback(&self.explainer, &prompt, EMAIL_EXPLANATION_LINES, || {
                EMAIL_FALLBACK_EXPLANATION
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .await;

        Ok(EmailReport {
            email: email.to_string(),
            exposure_summary: ExposureSummary::from_signals(&analysis.signals),
            analysis,
            ai_explanation,
            recommendations: EMAIL_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
            disclaimer: EMAIL_DISCLAIMER.to_string(),
        })
    }
}

/// Use case behind the four `POST /analyze/*-osint` endpoints
pub struct AnalyzeModuleUseCase {
    explainer: Arc<ExplainRiskUseCase>,
}

impl AnalyzeModuleUseCase {
    pub fn new(explainer: Arc<ExplainRiskUseCase>) -> Self {
        Self { explainer }
    }

    pub async fn execute(
        &self,
        module: ModuleType,
        input: Option<String>,
        authorized: bool,
    ) -> Result<ModuleReport, AnalysisError> {
        if !authorized {
            return Err(AnalysisError::Unauthorized);
        }

        let effective_input = input
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_MODULE_INPUT);

        let score = score_module(Some(effective_input), module);
        debug!(
            module = %module,
            final_score = score.final_score,
            risk_level = %score.risk_level,
            "Module input scored"
        );

        let prompt = PromptBuilder::build_module_prompt(
            module.as_str(),
            score.final_score,
            score.risk_level.as_str(),
            effective_input,
        );

        let ai_explanation =
            explain_or_fallback(&self.explainer, &prompt, MODULE_EXPLANATION_LINES, || {
                module_fallback_explanation(module)
            })
            .await;

        Ok(ModuleReport {
            module,
            input,
            score,
            exposure_summary: module.exposure_summary(),
            ai_explanation,
            recommendations: vec![format!("Minimize {} signals", module)],
            disclaimer: MODULE_DISCLAIMER.to_string(),
        })
    }
}
