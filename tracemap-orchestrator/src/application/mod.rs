//! Orchestrator application layer

pub mod errors;
pub mod use_cases;

pub use errors::AnalysisError;
pub use use_cases::*;
