//! Prompt templates for risk explanations
//!
//! Caller-supplied text is interpolated once with `format!` and never
//! re-scanned for placeholders.

pub struct PromptBuilder;

impl PromptBuilder {
    /// Prompt for a module score; the score is always shown with one decimal.
    pub fn build_module_prompt(module: &str, score: f64, level: &str, input: &str) -> String {
        format!(
            "Explain why a {module} OSINT risk score of {score:.1} ({level}) was assigned to {input}. 4 bullet points, calm academic language. No hacking."
        )
    }

    /// Prompt for the flagship email score.
    ///
    /// `masked_email` must already be masked. Integral scores render without
    /// a decimal point (`6`, not `6.0`).
    pub fn build_email_prompt(masked_email: &str, score: f64, level: &str) -> String {
        format!(
            "Explain WHY the risk level \"{level}\" was assigned to {masked_email} (Score: {score}/10.0). Bullet points, professional academic tone."
        )
    }
}
