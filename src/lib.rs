//! TraceMap - Main application library
//!
//! Wires configuration, the explanation provider and the HTTP router together.

mod app;

pub use app::{create_app, create_app_with_provider};
pub use tracemap_core::{Config, init_tracing};
pub use tracemap_orchestrator::presentation::controllers::OrchestratorState;

pub use tracemap_core;
pub use tracemap_llm;
pub use tracemap_orchestrator;
pub use tracemap_scoring;
