use std::sync::Arc;
use std::time::Duration;

use tracemap_core::config::LlmConfig;
use tracing::debug;

use crate::domain::{CompletionRequest, LlmError, LlmProvider};
use crate::infrastructure::ResponseParser;

/// Sends one explanation prompt and returns the usable bullet lines.
pub struct ExplainRiskUseCase {
    provider: Arc<dyn LlmProvider>,
    config: LlmConfig,
}

impl ExplainRiskUseCase {
    pub fn new(provider: Arc<dyn LlmProvider>, config: LlmConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider_id(&self) -> &'static str {
        self.provider.info().id
    }

    /// Exactly one provider call, bounded by `llm.timeout_seconds`.
    ///
    /// A reply with no line longer than the minimum length is reported as
    /// `InvalidResponse` so callers treat it like any other failure.
    pub async fn execute(&self, prompt: &str, max_lines: usize) -> Result<Vec<String>, LlmError> {
        let request = CompletionRequest::new()
            .with_user(prompt)
            .with_model(self.config.default_model.clone())
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature);

        let timeout_secs = self.config.timeout_seconds;
        let response = tokio::time::timeout(
            Duration::from_secs(timeout_secs),
            self.provider.complete(request),
        )
        .await
        .map_err(|_| LlmError::timeout(timeout_secs))??;

        let lines = ResponseParser::explanation_lines(&response.text, max_lines);
        debug!(
            model = %response.model,
            kept = lines.len(),
            truncated = response.is_truncated(),
            "Explanation received"
        );

        if lines.is_empty() {
            return Err(LlmError::InvalidResponse(
                "No usable explanation lines in response".to_string(),
            ));
        }

        Ok(lines)
    }
}
