//! TraceMap LLM - Natural-language explanations for risk scores
//!
//! The explanation service is an external collaborator: given a prompt it
//! returns free text or fails. Callers always hold it behind
//! `Arc<dyn LlmProvider>` so tests can substitute a fake.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::use_cases::ExplainRiskUseCase;
pub use domain::*;
pub use infrastructure::prompts;
pub use infrastructure::providers::{GoogleAIProvider, ResilientProvider, create_provider};
