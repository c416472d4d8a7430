//! Application setup and wiring

use std::sync::Arc;

use axum::Router;
use tracemap_core::Config;
use tracemap_llm::{ExplainRiskUseCase, LlmProvider, create_provider};
use tracemap_orchestrator::application::{AnalyzeEmailUseCase, AnalyzeModuleUseCase};
use tracemap_orchestrator::presentation::controllers::OrchestratorState;
use tracemap_orchestrator::presentation::routes::create_router;

/// Build the router from configuration, constructing the configured provider
pub fn create_app(config: &Config) -> Result<Router, Box<dyn std::error::Error + Send + Sync>> {
    let provider = create_provider(&config.llm)?;
    Ok(create_app_with_provider(config, provider))
}

/// Build the router around an already constructed explanation provider
pub fn create_app_with_provider(config: &Config, provider: Arc<dyn LlmProvider>) -> Router {
    let llm_provider = provider.info().id;
    let explainer = Arc::new(ExplainRiskUseCase::new(provider, config.llm.clone()));

    let orchestrator_state = OrchestratorState {
        analyze_email_use_case: Arc::new(AnalyzeEmailUseCase::new(explainer.clone())),
        analyze_module_use_case: Arc::new(AnalyzeModuleUseCase::new(explainer)),
        llm_provider,
    };

    create_router(orchestrator_state, &config.server)
}
