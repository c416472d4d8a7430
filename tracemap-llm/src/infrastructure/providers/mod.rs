//! Provider implementations and construction from configuration

pub mod google_ai;
pub mod resilient;

pub use google_ai::GoogleAIProvider;
pub use resilient::{CircuitState, ResilienceConfig, ResilientProvider};

use std::sync::Arc;

use tracemap_core::config::LlmConfig;
use tracing::info;

use crate::domain::{LlmError, LlmProvider};

/// Build the explanation provider described by `config`
///
/// The Google provider is always the base; the circuit breaker is layered on
/// top when `resilience.enabled` is set.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    let api_key = config
        .google_ai
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| LlmError::Configuration("Google AI API key not configured".to_string()))?;

    let google = GoogleAIProvider::new(api_key, config.default_model.clone())
        .with_base_url(config.google_ai.base_url.clone())
        .with_timeout(config.timeout_seconds);

    let provider: Arc<dyn LlmProvider> = if config.resilience.enabled {
        Arc::new(ResilientProvider::new(
            Arc::new(google),
            ResilienceConfig::from(&config.resilience),
        ))
    } else {
        Arc::new(google)
    };

    let provider_info = provider.info();
    info!(
        provider = provider_info.id,
        name = provider_info.name,
        api_version = provider_info.version,
        model = provider.default_model(),
        circuit_breaker = config.resilience.enabled,
        "Explanation provider initialized"
    );

    Ok(provider)
}
