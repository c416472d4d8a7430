//! HTTP middleware and error mapping

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use std::time::Instant;
use uuid::Uuid;

use crate::application::AnalysisError;
use crate::presentation::models::ErrorResponse;

/// Convert AnalysisError to HTTP response
pub fn analysis_error_to_response(error: AnalysisError) -> Response {
    let status = match error {
        AnalysisError::Unauthorized => StatusCode::FORBIDDEN,
        AnalysisError::InvalidEmail => StatusCode::BAD_REQUEST,
    };

    tracing::info!(error = %error, status = %status, "Request rejected");

    let body = ErrorResponse {
        error: error.to_string(),
    };
    (status, Json(body)).into_response()
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        analysis_error_to_response(self)
    }
}

/// Request logging middleware
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = Uuid::new_v4();
    let start_time = Instant::now();

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        "Processing request"
    );

    let response = next.run(request).await;
    let duration = start_time.elapsed();

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}
