//! Shared router harness and mock explanation provider

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, body::Body, http::Request};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

use tracemap_core::config::{LlmConfig, ServerConfig};
use tracemap_llm::domain::{
    CompletionRequest, CompletionResponse, LlmError, LlmProvider, ProviderInfo, StopReason, Usage,
};
use tracemap_llm::ExplainRiskUseCase;
use tracemap_orchestrator::application::{AnalyzeEmailUseCase, AnalyzeModuleUseCase};
use tracemap_orchestrator::presentation::{OrchestratorState, create_router};

pub const BULLETS: &str = "Overview\n\
* The local part is short, which raises its public visibility.\n\
* Administrative keywords are frequently indexed by crawlers.\n\
* ok\n\
* The address format lacks separators, suggesting an older account.\n\
* Exposure can be reduced by adjusting privacy settings.";

#[derive(Clone)]
pub enum MockBehavior {
    Reply(String),
    Fail(LlmError),
    Panic,
}

/// Mock explanation provider that records every prompt it receives
pub struct MockLlmProvider {
    behavior: MockBehavior,
    calls: AtomicUsize,
    pub captured_prompts: Mutex<Vec<String>>,
}

impl MockLlmProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            captured_prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(MockBehavior::Reply(text.to_string()))
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Fail(LlmError::ServiceUnavailable(
            "upstream down".to_string(),
        )))
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
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
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.captured_prompts.lock().await.push(request.user_text());

        match &self.behavior {
            MockBehavior::Reply(text) => Ok(CompletionResponse {
                id: "mock-response".to_string(),
                model: "test-model".to_string(),
                text: text.clone(),
                stop_reason: StopReason::EndTurn,
                usage: Usage::default(),
                created: None,
            }),
            MockBehavior::Fail(error) => Err(error.clone()),
            MockBehavior::Panic => panic!("explanation provider exploded"),
        }
    }
}

pub fn test_llm_config() -> LlmConfig {
    let mut config = LlmConfig::default();
    config.google_ai.api_key = Some("test-api-key".to_string());
    config.timeout_seconds = 2;
    config
}

/// Router wired exactly as in production, with `provider` as the explanation service
pub fn test_router(provider: Arc<MockLlmProvider>) -> Router {
    let explainer = Arc::new(ExplainRiskUseCase::new(provider, test_llm_config()));

    let state = OrchestratorState {
        analyze_email_use_case: Arc::new(AnalyzeEmailUseCase::new(explainer.clone())),
        analyze_module_use_case: Arc::new(AnalyzeModuleUseCase::new(explainer)),
        llm_provider: "mock",
    };

    create_router(state, &ServerConfig::default())
}

pub fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// POST with an arbitrary body and optional content type
pub fn raw_post(uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
