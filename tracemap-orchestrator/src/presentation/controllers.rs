//! Analysis controllers

pub mod health;

use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
};
use std::sync::Arc;

use tracemap_scoring::ModuleType;

use crate::application::{AnalysisError, AnalyzeEmailUseCase, AnalyzeModuleUseCase};
use crate::presentation::models::{
    EmailAnalysisRequest, EmailAnalysisResponse, ErrorResponse, FallbackAnalysisResponse,
    ModuleAnalysisRequest, ModuleAnalysisResponse,
};

/// Shared state for all handlers
#[derive(Clone)]
pub struct OrchestratorState {
    pub analyze_email_use_case: Arc<AnalyzeEmailUseCase>,
    pub analyze_module_use_case: Arc<AnalyzeModuleUseCase>,
    /// Identifier of the explanation provider, reported by /health
    pub llm_provider: &'static str,
}

/// POST /analyze-email - Flagship email exposure analysis
#[utoipa::path(
    post,
    path = "/analyze-email",
    request_body = EmailAnalysisRequest,
    responses(
        (status = 200, description = "Analysis completed, or the minimal fallback body for an unreadable request", body = EmailAnalysisResponse),
        (status = 400, description = "Missing or malformed email", body = ErrorResponse),
        (status = 403, description = "Authorization flag not set", body = ErrorResponse)
    ),
    tag = "analysis"
)]
pub async fn analyze_email(
    State(state): State<OrchestratorState>,
    payload: Result<Json<EmailAnalysisRequest>, JsonRejection>,
) -> Result<Response, AnalysisError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(
                status = %rejection.status(),
                error = %rejection.body_text(),
                "Unreadable email analysis request, returning minimal result"
            );
            return Ok(Json(FallbackAnalysisResponse::default()).into_response());
        }
    };

    if let Some(input_type) = request.input_type.as_deref() {
        tracing::debug!(input_type, "Flagship analysis requested");
    }

    let email = request.email.unwrap_or_default();
    let authorized = request.authorized;
    let use_case = state.analyze_email_use_case.clone();

    // A panic inside scoring or explanation must still produce a 200.
    let outcome = tokio::spawn(async move { use_case.execute(&email, authorized).await }).await;

    match outcome {
        Ok(result) => {
            let report = result?;
            Ok(Json(EmailAnalysisResponse::from(report)).into_response())
        }
        Err(join_error) => {
            tracing::error!(error = %join_error, "Email analysis aborted, returning minimal result");
            Ok(Json(FallbackAnalysisResponse::default()).into_response())
        }
    }
}

/// POST /analyze - Legacy alias for /analyze-email
#[utoipa::path(
    post,
    path = "/analyze",
    responses(
        (status = 307, description = "Temporary redirect to /analyze-email, method and body preserved")
    ),
    tag = "analysis"
)]
pub async fn analyze_alias() -> Redirect {
    Redirect::temporary("/analyze-email")
}

fn rejection_to_response(rejection: JsonRejection) -> Response {
    tracing::info!(status = %rejection.status(), "Malformed request body");

    let body = ErrorResponse {
        error: rejection.body_text(),
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

async fn run_module(
    state: &OrchestratorState,
    module: ModuleType,
    payload: Result<Json<ModuleAnalysisRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_to_response(rejection),
    };

    match state
        .analyze_module_use_case
        .execute(module, request.input_value, request.authorized)
        .await
    {
        Ok(report) => Json(ModuleAnalysisResponse::from(report)).into_response(),
        Err(error) => error.into_response(),
    }
}

/// POST /analyze/text-osint - Text module analysis
#[utoipa::path(
    post,
    path = "/analyze/text-osint",
    request_body = ModuleAnalysisRequest,
    responses(
        (status = 200, description = "Analysis completed", body = ModuleAnalysisResponse),
        (status = 400, description = "Malformed JSON body", body = ErrorResponse),
        (status = 403, description = "Authorization flag not set", body = ErrorResponse)
    ),
    tag = "modules"
)]
pub async fn analyze_text_osint(
    State(state): State<OrchestratorState>,
    payload: Result<Json<ModuleAnalysisRequest>, JsonRejection>,
) -> Response {
    run_module(&state, ModuleType::Text, payload).await
}

/// POST /analyze/image-osint - Image module analysis
#[utoipa::path(
    post,
    path = "/analyze/image-osint",
    request_body = ModuleAnalysisRequest,
    responses(
        (status = 200, description = "Analysis completed", body = ModuleAnalysisResponse),
        (status = 400, description = "Malformed JSON body", body = ErrorResponse),
        (status = 403, description = "Authorization flag not set", body = ErrorResponse)
    ),
    tag = "modules"
)]
pub async fn analyze_image_osint(
    State(state): State<OrchestratorState>,
    payload: Result<Json<ModuleAnalysisRequest>, JsonRejection>,
) -> Response {
    run_module(&state, ModuleType::Image, payload).await
}

/// POST /analyze/location-osint - Location module analysis
#[utoipa::path(
    post,
    path = "/analyze/location-osint",
    request_body = ModuleAnalysisRequest,
    responses(
        (status = 200, description = "Analysis completed", body = ModuleAnalysisResponse),
        (status = 400, description = "Malformed JSON body", body = ErrorResponse),
        (status = 403, description = "Authorization flag not set", body = ErrorResponse)
    ),
    tag = "modules"
)]
pub async fn analyze_location_osint(
    State(state): State<OrchestratorState>,
    payload: Result<Json<ModuleAnalysisRequest>, JsonRejection>,
) -> Response {
    run_module(&state, ModuleType::Location, payload).await
}

/// POST /analyze/code-osint - Code module analysis
#[utoipa::path(
    post,
    path = "/analyze/code-osint",
    request_body = ModuleAnalysisRequest,
    responses(
        (status = 200, description = "Analysis completed", body = ModuleAnalysisResponse),
        (status = 400, description = "Malformed JSON body", body = ErrorResponse),
        (status = 403, description = "Authorization flag not set", body = ErrorResponse)
    ),
    tag = "modules"
)]
pub async fn analyze_code_osint(
    State(state): State<OrchestratorState>,
    payload: Result<Json<ModuleAnalysisRequest>, JsonRejection>,
) -> Response {
    run_module(&state, ModuleType::Code, payload).await
}
