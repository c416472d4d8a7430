//! Service information and health endpoints

use axum::{extract::State, response::Json};

use crate::presentation::controllers::OrchestratorState;
use crate::presentation::models::HealthResponse;

/// GET /health - Liveness check
///
/// Does not call the explanation provider; an unreachable provider only
/// degrades explanations, never availability.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<OrchestratorState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        llm_provider: state.llm_provider.to_string(),
    })
}

/// GET / - Service banner
pub async fn root_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "TraceMap Engine",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Simulated OSINT exposure scoring for education",
        "endpoints": {
            "health": "/health",
            "analyze_email": "/analyze-email",
            "modules": [
                "/analyze/text-osint",
                "/analyze/image-osint",
                "/analyze/location-osint",
                "/analyze/code-osint"
            ],
            "docs": "/docs"
        }
    }))
}
