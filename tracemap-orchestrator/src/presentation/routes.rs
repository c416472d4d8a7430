//! Route definitions and server setup

use axum::http::StatusCode;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tracemap_core::config::ServerConfig;

use crate::presentation::{
    controllers::{
        OrchestratorState, analyze_alias, analyze_code_osint, analyze_email, analyze_image_osint,
        analyze_location_osint, analyze_text_osint,
        health::{health_check, root_handler},
    },
    middleware::logging_middleware,
    models::*,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::controllers::analyze_email,
        crate::presentation::controllers::analyze_alias,
        crate::presentation::controllers::analyze_text_osint,
        crate::presentation::controllers::analyze_image_osint,
        crate::presentation::controllers::analyze_location_osint,
        crate::presentation::controllers::analyze_code_osint,
        crate::presentation::controllers::health::health_check
    ),
    components(
        schemas(
            EmailAnalysisRequest,
            EmailAnalysisResponse,
            ModuleAnalysisRequest,
            ModuleAnalysisResponse,
            FallbackAnalysisResponse,
            ErrorResponse,
            HealthResponse,
            tracemap_scoring::ExposureSummary,
            tracemap_scoring::RiskLevel
        )
    ),
    tags(
        (name = "analysis", description = "Flagship email exposure analysis"),
        (name = "modules", description = "Text, Image, Location and Code module analysis"),
        (name = "health", description = "Service health")
    ),
    info(
        title = "TraceMap API",
        version = "0.3.0",
        description = "Simulated OSINT exposure scoring. All signals are synthesized from the submitted identifier; no real data is collected.",
        license(
            name = "AGPL-3.0",
            url = "https://www.gnu.org/licenses/agpl-3.0.html"
        )
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    )
)]
pub struct ApiDoc;

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let methods = [
        axum::http::Method::GET,
        axum::http::Method::POST,
        axum::http::Method::OPTIONS,
    ];
    let headers = [
        axum::http::header::CONTENT_TYPE,
        axum::http::header::ACCEPT,
        axum::http::header::ORIGIN,
    ];

    if server.allowed_origins.len() == 1 && server.allowed_origins[0] == "*" {
        tracing::debug!("CORS: allowing any origin");
        CorsLayer::new()
            .allow_origin(tower_http::cors::AllowOrigin::any())
            .allow_methods(methods)
            .allow_headers(headers)
            .max_age(Duration::from_secs(3600))
    } else {
        let origins: Vec<axum::http::HeaderValue> = server
            .allowed_origins
            .iter()
            .filter_map(|origin| {
                axum::http::HeaderValue::from_str(origin)
                    .map_err(|_| {
                        tracing::warn!(origin, "Invalid CORS origin in config; skipping");
                    })
                    .ok()
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(headers)
            .max_age(Duration::from_secs(3600))
    }
}

/// Create the application router with its middleware stack
pub fn create_router(orchestrator_state: OrchestratorState, server: &ServerConfig) -> Router {
    let analysis_routes = Router::new()
        .route("/analyze-email", post(analyze_email))
        .route("/analyze", post(analyze_alias))
        .route("/analyze/text-osint", post(analyze_text_osint))
        .route("/analyze/image-osint", post(analyze_image_osint))
        .route("/analyze/location-osint", post(analyze_location_osint))
        .route("/analyze/code-osint", post(analyze_code_osint));

    let health_routes = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check));

    let mut router = Router::new().merge(analysis_routes).merge(health_routes);

    if server.enable_docs {
        router =
            router.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(server))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout_seconds),
        ))
        .layer(middleware::from_fn(logging_middleware));

    router
        .layer(service_builder)
        .with_state(orchestrator_state)
}
