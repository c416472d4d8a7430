//! Flagship four-signal email scoring model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::risk_level::{MAX_RISK_SCORE, RiskLevel};
use crate::{round_to_tenth, seed_of};

/// Substrings that suggest an account shared across platforms
const PLATFORM_REUSE_TERMS: [&str; 5] = ["dev", "admin", "test", "support", "root"];

/// Substrings that suggest a developer-style identity
const DEVELOPER_TERMS: [&str; 7] = ["git", "code", "dev", "api", "stack", "repo", "engineer"];

const SHORT_LOCAL_PART_LEN: u32 = 10;
const SHORT_LOCAL_PART_BONUS: u32 = 20;
const PLATFORM_REUSE_BONUS: u32 = 20;
const DEVELOPER_BONUS: u32 = 15;
const METADATA_BASE: u32 = 5;
const UNDOTTED_METADATA_BONUS: u32 = 5;

/// Errors raised by the scoring engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("Email address must contain '@'")]
    MissingAtSign,
}

/// Four synthesized sub-scores of the flagship model.
///
/// Nominal ranges are 0-30, 0-30, 0-20 and 0-20, but the additive rules are
/// applied as-is: `metadata_visibility` can reach 24 for some seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SignalBundle {
    pub public_presence: u32,
    pub platform_reuse: u32,
    pub developer_exposure: u32,
    pub metadata_visibility: u32,
}

impl SignalBundle {
    /// Sum of the four signals (0-100 scale before conversion)
    pub fn internal_score(&self) -> u32 {
        self.public_presence
            + self.platform_reuse
            + self.developer_exposure
            + self.metadata_visibility
    }
}

/// Result of scoring an email address
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmailAnalysis {
    pub signals: SignalBundle,
    /// 0.0-10.0, one decimal place
    pub final_score: f64,
    pub risk_level: RiskLevel,
}

/// Score an email address with the four-signal model.
///
/// The input is lower-cased; everything before the first `@` is the local
/// part whose length seeds every signal.
pub fn score_email(email: &str) -> Result<EmailAnalysis, ScoringError> {
    let lower = email.to_lowercase();
    let (local_part, _) = lower.split_once('@').ok_or(ScoringError::MissingAtSign)?;
    let seed = seed_of(local_part);

    let mut public_presence = 0;
    if seed < SHORT_LOCAL_PART_LEN {
        public_presence += SHORT_LOCAL_PART_BONUS;
    }
    public_presence += (seed * 3) % 10;

    let mut platform_reuse = 0;
    if contains_any(&lower, &PLATFORM_REUSE_TERMS) {
        platform_reuse += PLATFORM_REUSE_BONUS;
    }
    platform_reuse += seed % 10;

    let mut developer_exposure = 0;
    if contains_any(&lower, &DEVELOPER_TERMS) {
        developer_exposure += DEVELOPER_BONUS;
    }
    developer_exposure += seed % 5;

    // Undotted addresses read as older, simpler formats
    let mut metadata_visibility = (seed % 15) + METADATA_BASE;
    if !lower.contains('.') {
        metadata_visibility += UNDOTTED_METADATA_BONUS;
    }

    let signals = SignalBundle {
        public_presence,
        platform_reuse,
        developer_exposure,
        metadata_visibility,
    };

    let scaled = f64::from(signals.internal_score()) / 100.0 * 10.0;
    let final_score = round_to_tenth(scaled).min(MAX_RISK_SCORE);

    Ok(EmailAnalysis {
        signals,
        final_score,
        risk_level: RiskLevel::from_score(final_score),
    })
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
