//! Common test utilities and mock implementations

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracemap_core::config::LlmConfig;
use tracemap_llm::domain::{
    CompletionRequest, CompletionResponse, LlmError, LlmProvider, ProviderInfo, StopReason, Usage,
};

/// Mock LLM provider for testing
pub struct MockLlmProvider {
    /// Response to return from complete()
    pub response: Option<CompletionResponse>,
    /// Error to return (if any)
    pub error: Option<LlmError>,
    /// Artificial latency before answering
    pub delay: Option<Duration>,
    /// Captured requests for verification
    pub captured_requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockLlmProvider {
    pub fn new() -> Self {
        Self {
            response: None,
            error: None,
            delay: None,
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_text(text: &str) -> Self {
        Self::new().with_response(create_completion_response(text))
    }

    pub fn with_response(mut self, response: CompletionResponse) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_error(mut self, error: LlmError) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            id: "mock",
            name: "Mock Provider",
            version: "test",
        }
    }

    fn default_model(&self) -> &str {
        "test-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.captured_requests.lock().await.push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = &self.error {
            return Err(error.clone());
        }

        self.response
            .clone()
            .ok_or_else(|| LlmError::InvalidResponse("No response configured".to_string()))
    }
}

/// Create a standard LLM response with given text
pub fn create_completion_response(text: &str) -> CompletionResponse {
    CompletionResponse {
        id: "test-response-id".to_string(),
        model: "test-model".to_string(),
        text: text.to_string(),
        stop_reason: StopReason::EndTurn,
        usage: Usage {
            prompt_tokens: 40,
            completion_tokens: 60,
            total_tokens: 100,
        },
        created: Some(1234567890),
    }
}

/// Create default test LlmConfig
pub fn create_test_config() -> LlmConfig {
    let mut config = LlmConfig::default();
    config.google_ai.api_key = Some("test-api-key".to_string());
    config.default_model = "test-model".to_string();
    config.timeout_seconds = 1;
    config
}
