//! End-to-end tests: configuration -> provider -> router, with the Google
//! endpoint served by wiremock

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tracemap::{Config, create_app};

fn test_config(mock_server: &MockServer) -> Config {
    let mut config = Config::default();
    config.llm.google_ai.api_key = Some("test-api-key".to_string());
    config.llm.google_ai.base_url = mock_server.uri();
    config.llm.timeout_seconds = 2;
    config
}

fn app(config: &Config) -> Router {
    create_app(config).expect("app should build with an API key")
}

fn analyze_email_request(email: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze-email")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "email": email, "authorized": true }).to_string(),
        ))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_explanation_from_google_provider() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(query_param("key", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{
                        "text": "**Why HIGH**\n* Short local parts are easy to enumerate.\n* The admin keyword suggests shared, reused accounts.\n"
                    }]
                },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = app(&test_config(&mock_server))
        .oneshot(analyze_email_request("admin@example.com"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["risk_level"], "HIGH");
    assert_eq!(
        body["ai_explanation"],
        json!([
            "* Short local parts are easy to enumerate.",
            "* The admin keyword suggests shared, reused accounts."
        ])
    );
}

#[tokio::test]
async fn test_upstream_failure_uses_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = app(&test_config(&mock_server))
        .oneshot(analyze_email_request("admin@example.com"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["risk_score"], 6.0);
    assert_eq!(body["ai_explanation"][0], "Analyzing digital footprints...");
}

#[tokio::test]
async fn test_slow_upstream_is_bounded_by_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "candidates": [] }))
                .set_delay(std::time::Duration::from_secs(10)),
        )
        .mount(&mock_server)
        .await;

    let started = std::time::Instant::now();
    let response = app(&test_config(&mock_server))
        .oneshot(analyze_email_request("alice@example.com"))
        .await
        .unwrap();

    assert!(started.elapsed() < std::time::Duration::from_secs(5));
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ai_explanation"][1], "Mapping platform reuse signals...");
}

#[test]
fn test_app_requires_api_key() {
    let config = Config::default();
    assert!(create_app(&config).is_err());
}
