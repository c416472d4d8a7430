//! Per-module scoring model for the Text, Image, Location and Code analyzers
//!
//! This formula predates the flagship email model and is intentionally simpler.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::risk_level::{MAX_RISK_SCORE, RiskLevel};
use crate::{round_to_tenth, seed_of};

/// Input used when the caller supplies nothing to score
const DEFAULT_MODULE_INPUT: &str = "default";

/// Analyzer module selected by the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ModuleType {
    Text,
    Image,
    Location,
    Code,
}

impl ModuleType {
    pub const ALL: [ModuleType; 4] = [
        ModuleType::Text,
        ModuleType::Image,
        ModuleType::Location,
        ModuleType::Code,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleType::Text => "Text",
            ModuleType::Image => "Image",
            ModuleType::Location => "Location",
            ModuleType::Code => "Code",
        }
    }

    /// Fixed exposure categories reported by each module
    pub fn exposure_summary(&self) -> BTreeMap<String, String> {
        let entries: &[(&str, &str)] = match self {
            ModuleType::Text => &[
                ("public_mentions", "Simulated"),
                ("platform_reuse", "Detected"),
            ],
            ModuleType::Image => &[("metadata", "Substantial")],
            ModuleType::Location => &[("timezone", "Simulated")],
            ModuleType::Code => &[("email_exposure", "Detected")],
        };

        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    /// Raw 0-100 score before conversion
    fn raw_score(&self, input: &str) -> u32 {
        let seed = seed_of(input);
        match self {
            ModuleType::Text => {
                let mut score = (seed % 40) + 20;
                if input.contains("admin") || input.contains("root") {
                    score += 25;
                }
                score
            }
            ModuleType::Image => (seed % 30) + 30,
            ModuleType::Location => (seed % 50) + 10,
            ModuleType::Code => {
                let mut score = (seed % 35) + 15;
                if input.contains("api") || input.contains("key") {
                    score += 40;
                }
                score
            }
        }
    }
}

impl std::fmt::Display for ModuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of the per-module model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModuleScore {
    /// 0.0-10.0, one decimal place
    pub final_score: f64,
    pub risk_level: RiskLevel,
}

/// Score an arbitrary input for one analyzer module.
///
/// `None` and the empty string both score as `"default"`. Trigger terms are
/// matched case-sensitively.
pub fn score_module(input: Option<&str>, module: ModuleType) -> ModuleScore {
    let input = input
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_MODULE_INPUT);

    let raw = module.raw_score(input);
    let final_score = round_to_tenth(f64::from(raw) / 10.0).min(MAX_RISK_SCORE);

    ModuleScore {
        final_score,
        risk_level: RiskLevel::from_score(final_score),
    }
}
