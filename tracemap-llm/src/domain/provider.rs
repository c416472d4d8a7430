//! LLM Provider trait

use async_trait::async_trait;

use crate::domain::error::LlmError;
use crate::domain::messages::{CompletionRequest, CompletionResponse};

/// Metadata about a provider
#[derive(Debug, Clone)]
pub struct ProviderInfo {
    /// Provider identifier (e.g., "google_ai")
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// API version spoken by the provider
    pub version: &'static str,
}

/// Core trait for LLM providers
///
/// The trait is object-safe and is used through `Arc<dyn LlmProvider>`.
///
/// ```rust,ignore
/// use tracemap_llm::{CompletionRequest, LlmError, LlmProvider};
///
/// async fn ask(provider: &dyn LlmProvider) -> Result<String, LlmError> {
///     let request = CompletionRequest::new().with_user("Explain this score");
///     Ok(provider.complete(request).await?.text)
/// }
/// ```
#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn info(&self) -> ProviderInfo;

    /// Generate a completion
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Check if the provider is reachable and accepting requests
    async fn health_check(&self) -> Result<(), LlmError> {
        let request = CompletionRequest::new()
            .with_user("ping")
            .with_max_tokens(1);

        self.complete(request).await.map(|_| ())
    }

    fn default_model(&self) -> &str;
}
