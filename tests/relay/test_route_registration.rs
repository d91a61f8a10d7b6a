// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Route registration tests
//!
//! These tests verify that:
//! - /api/gemini answers OPTIONS and CORS preflights
//! - Methods other than POST/OPTIONS get a JSON 405
//! - /health reports configuration
//! - Oversized bodies are rejected before reaching Gemini

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use fabstir_gemini_relay::{
    api::{create_app, HealthResponse, GENERATE_PATH},
    AppState, RelayConfig,
};
use serde_json::json;
use tower::util::ServiceExt;

use super::common::{body_bytes, body_json, post_json, relay_app_without_key, FakeGemini};

#[tokio::test]
async fn test_plain_options_returns_empty_200() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri(GENERATE_PATH)
        .body(Body::empty())
        .unwrap();

    let response = relay_app_without_key().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap();
    assert!(methods.contains("POST"));
    assert!(methods.contains("OPTIONS"));
    assert!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .eq_ignore_ascii_case("content-type"));
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_cors_preflight() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri(GENERATE_PATH)
        .header(header::ORIGIN, "https://app.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = relay_app_without_key().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap();
    assert!(methods.contains("POST"));
    assert!(methods.contains("OPTIONS"));
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_cross_origin_post_gets_allow_origin() {
    let mut request = post_json(GENERATE_PATH, "{}");
    request
        .headers_mut()
        .insert(header::ORIGIN, "https://app.example.com".parse().unwrap());

    let response = relay_app_without_key().oneshot(request).await.unwrap();

    // Error responses carry CORS headers too
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_other_methods_are_rejected() {
    for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
        let request = Request::builder()
            .method(method.clone())
            .uri(GENERATE_PATH)
            .body(Body::empty())
            .unwrap();

        let response = relay_app_without_key().oneshot(request).await.unwrap();

        assert_eq!(
            response.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "method: {method}"
        );
        assert_eq!(
            body_json(response).await,
            json!({"error": "Method not allowed"})
        );
    }
}

#[tokio::test]
async fn test_health_without_key() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = relay_app_without_key().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let health: HealthResponse = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.model, "gemini-2.0-flash");
    assert!(!health.api_key_configured);
}

#[tokio::test]
async fn test_health_with_key() {
    let fake = FakeGemini::start(StatusCode::OK, "{}").await;
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = fake.relay_app().oneshot(request).await.unwrap();

    let json = body_json(response).await;
    assert_eq!(json["apiKeyConfigured"], true);
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = relay_app_without_key()
        .oneshot(post_json("/api/openai", r#"{"prompt":"hi"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let fake = FakeGemini::start(StatusCode::OK, "{}").await;
    let config = RelayConfig {
        max_body_bytes: 64,
        ..fake.config()
    };
    let app = create_app(AppState::from_config(config).unwrap());

    let body = json!({"prompt": "hi", "image": "A".repeat(1024)}).to_string();
    let response = app.oneshot(post_json(GENERATE_PATH, body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let json = body_json(response).await;
    let error = json["error"].as_str().unwrap();
    assert!(error.contains("length limit exceeded"), "error: {error}");
    assert!(json.get("details").is_none());
    assert!(fake.requests().is_empty());
}
