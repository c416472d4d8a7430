//! Google AI Studio (Gemini) provider implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use crate::domain::{
    CompletionRequest, CompletionResponse, LlmError, LlmProvider, ProviderInfo, Role, StopReason,
    Usage,
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google AI Studio (Gemini) provider
pub struct GoogleAIProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl GoogleAIProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Create with custom base URL (for testing or proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Per-request timeout in seconds
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(Duration::from_secs(seconds));
        self
    }

    fn build_url(&self, model: &str, endpoint: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.base_url, model, endpoint, self.api_key
        )
    }

    fn to_gemini_request(&self, request: &CompletionRequest) -> GeminiRequest {
        let contents = request
            .messages
            .iter()
            .map(|m| GeminiContent {
                role: match m.role {
                    Role::Assistant => "model".to_string(),
                    Role::User => "user".to_string(),
                },
                parts: vec![GeminiPart {
                    text: m.content.clone(),
                }],
            })
            .collect();

        let generation_config = if request.temperature.is_some() || request.max_tokens.is_some() {
            Some(GeminiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            })
        } else {
            None
        };

        GeminiRequest {
            contents,
            generation_config,
        }
    }

    fn from_gemini_response(
        &self,
        response: GeminiResponse,
        model: &str,
    ) -> Result<CompletionResponse, LlmError> {
        let candidate =
            response.candidates.into_iter().next().ok_or_else(|| {
                LlmError::InvalidResponse("No candidates in response".to_string())
            })?;

        let stop_reason = match candidate.finish_reason.as_deref() {
            Some("STOP") => StopReason::EndTurn,
            Some("MAX_TOKENS") => StopReason::MaxTokens,
            Some("SAFETY") => StopReason::ContentFilter,
            _ => StopReason::Other,
        };

        let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
        if parts.is_empty() && stop_reason == StopReason::ContentFilter {
            return Err(LlmError::ContentFiltered {
                reason: "SAFETY".to_string(),
            });
        }

        let text = parts.into_iter().map(|p| p.text).collect::<String>();

        let usage = response
            .usage_metadata
            .map(|u| Usage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: format!("gemini-{}", uuid::Uuid::new_v4()),
            model: model.to_string(),
            text,
            stop_reason,
            usage,
            created: Some(chrono::Utc::now().timestamp() as u64),
        })
    }
}

#[async_trait]
impl LlmProvider for GoogleAIProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            id: "google_ai",
            name: "Google AI Studio",
            version: "v1beta",
        }
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let model = request.model.as_deref().unwrap_or(&self.model);
        let url = self.build_url(model, "generateContent");
        let gemini_request = self.to_gemini_request(&request);

        debug!(model = model, "Sending request to Google AI");

        let mut builder = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&gemini_request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| match self.timeout {
            Some(timeout) if e.is_timeout() => LlmError::timeout(timeout.as_secs()),
            _ => LlmError::from(e),
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(LlmError::rate_limited(text));
            } else if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(LlmError::auth(text));
            } else if status.is_server_error() {
                return Err(LlmError::ServiceUnavailable(text));
            }

            error!(status = %status, "Google AI API error: {}", text);
            return Err(LlmError::InvalidResponse(format!(
                "API error {}: {}",
                status, text
            )));
        }

        let body = response.text().await?;
        let gemini_response: GeminiResponse = serde_json::from_str(&body)?;
        self.from_gemini_response(gemini_response, model)
    }
}

// === Gemini API Types ===

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}
