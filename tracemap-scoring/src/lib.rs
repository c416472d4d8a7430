//! TraceMap Scoring - Deterministic exposure scoring engine
//!
//! No real data is collected: every "signal" is synthesized from the length
//! and substring content of the caller-supplied identifier. Two formulas exist
//! and are independent:
//!
//! - [`score_email`]: the four-signal flagship model used by `/analyze-email`
//! - [`score_module`]: the simpler per-module model used by the Text, Image,
//!   Location and Code endpoints
//!
//! Scores from the two formulas are not comparable for the same input.
//!
//! # Example
//!
//! ```rust
//! use tracemap_scoring::{RiskLevel, score_email};
//!
//! let analysis = score_email("admin@example.com").unwrap();
//! assert_eq!(analysis.final_score, 6.0);
//! assert_eq!(analysis.risk_level, RiskLevel::High);
//! ```

pub mod email;
pub mod exposure;
pub mod masking;
pub mod module;
pub mod risk_level;

pub use email::{EmailAnalysis, ScoringError, SignalBundle, score_email};
pub use exposure::ExposureSummary;
pub use masking::mask_email;
pub use module::{ModuleScore, ModuleType, score_module};
pub use risk_level::{MAX_RISK_SCORE, RiskLevel};

/// Round half away from zero to one decimal place.
pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Length used as the scoring seed, counted in Unicode scalar values.
pub(crate) fn seed_of(value: &str) -> u32 {
    u32::try_from(value.chars().count()).unwrap_or(u32::MAX)
}
