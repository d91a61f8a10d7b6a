// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! GeminiClient tests against a local fake Gemini server

use axum::http::StatusCode;
use fabstir_gemini_relay::{ContentGenerator, GeminiClient, GeminiError, GenerationInput, RelayConfig};
use serde_json::json;

use super::common::{FakeGemini, TEST_API_KEY};

#[tokio::test]
async fn test_generate_returns_first_candidate_text() {
    let reply = json!({
        "candidates": [
            {"content": {"parts": [{"text": "first"}, {"text": "second part"}]}},
            {"content": {"parts": [{"text": "other candidate"}]}}
        ]
    });
    let fake = FakeGemini::start(StatusCode::OK, reply.to_string()).await;
    let client = GeminiClient::new(&fake.config()).unwrap();

    let text = client
        .generate(&GenerationInput::text("hello"))
        .await
        .unwrap();
    assert_eq!(text, "first");
}

#[tokio::test]
async fn test_generation_settings_come_from_config() {
    let reply = json!({"candidates": [{"content": {"parts": [{"text": "ok"}]}}]});
    let fake = FakeGemini::start(StatusCode::OK, reply.to_string()).await;
    let config = RelayConfig {
        model: "gemini-1.5-pro".to_string(),
        api_version: "v1".to_string(),
        temperature: 0.25,
        max_output_tokens: 256,
        image_mime_type: "image/png".to_string(),
        ..fake.config()
    };
    let client = GeminiClient::new(&config).unwrap();

    client
        .generate(&GenerationInput::text("describe").with_image("iVBORw0KGgo="))
        .await
        .unwrap();

    let request = &fake.requests()[0];
    assert_eq!(request.path, "/v1/models/gemini-1.5-pro:generateContent");
    assert_eq!(request.query, format!("key={}", TEST_API_KEY));
    assert_eq!(
        request.body["generationConfig"],
        json!({"temperature": 0.25, "maxOutputTokens": 256})
    );
    assert_eq!(
        request.body["contents"][0]["parts"][1]["inline_data"]["mime_type"],
        "image/png"
    );
}

#[tokio::test]
async fn test_provider_error_ignores_http_status() {
    // Gemini sometimes reports errors with a 200; the body decides
    let fake = FakeGemini::start(
        StatusCode::OK,
        r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#,
    )
    .await;
    let client = GeminiClient::new(&fake.config()).unwrap();

    let err = client
        .generate(&GenerationInput::text("hi"))
        .await
        .unwrap_err();
    match err {
        GeminiError::Provider { message, details } => {
            assert_eq!(message, "Resource has been exhausted");
            assert_eq!(details["status"], "RESOURCE_EXHAUSTED");
        }
        other => panic!("expected provider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_success_status_without_text_is_empty_completion() {
    let fake = FakeGemini::start(StatusCode::OK, r#"{"candidates":[]}"#).await;
    let client = GeminiClient::new(&fake.config()).unwrap();

    let err = client
        .generate(&GenerationInput::text("hi"))
        .await
        .unwrap_err();
    match err {
        GeminiError::EmptyCompletion { response } => {
            assert_eq!(response, json!({"candidates": []}));
        }
        other => panic!("expected empty completion, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_gemini_does_not_leak_key() {
    // Bind then drop a listener to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = RelayConfig {
        api_key: Some(TEST_API_KEY.to_string()),
        api_base_url: format!("http://{}", addr),
        request_timeout_secs: 5,
        ..Default::default()
    };
    let client = GeminiClient::new(&config).unwrap();

    let err = client
        .generate(&GenerationInput::text("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, GeminiError::Transport(_)));
    assert!(!err.to_string().contains(TEST_API_KEY));
}
