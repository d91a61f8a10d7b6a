// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gemini generateContent wire types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Fallback message when the provider error carries none
pub const DEFAULT_PROVIDER_ERROR: &str = "Gemini API error";

/// Prompt plus optional base64 image handed to a generator
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationInput {
    pub prompt: String,
    /// Base64 image payload, sent as inline data
    pub image: Option<String>,
}

impl GenerationInput {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

// --- Request ---

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// A single content part. Inline data keeps the snake_case field names
/// Gemini accepts on input.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl GenerateContentRequest {
    /// Build a single-turn request: the prompt text first, then the image if any
    pub fn new(input: &GenerationInput, image_mime_type: &str, config: GenerationConfig) -> Self {
        let mut parts = vec![Part::Text {
            text: input.prompt.clone(),
        }];
        if let Some(image) = &input.image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: image_mime_type.to_string(),
                    data: image.clone(),
                },
            });
        }

        Self {
            contents: vec![Content { parts, role: None }],
            generation_config: config,
        }
    }
}

// --- Response ---

/// Text of the first part of the first candidate, if it is a non-empty string.
/// Other candidates and fields are not looked at.
pub fn first_candidate_text(response: &Value) -> Option<&str> {
    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

pub fn finish_reason(response: &Value) -> Option<&str> {
    response
        .pointer("/candidates/0/finishReason")
        .and_then(Value::as_str)
}

/// Token counts reported alongside a completion
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

impl UsageMetadata {
    /// `None` when the response has no usable `usageMetadata`
    pub fn from_response(response: &Value) -> Option<Self> {
        Self::deserialize(response.get("usageMetadata")?).ok()
    }
}

/// Loose truthiness for provider JSON: null, false, 0 and "" count as absent
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Errors from a Gemini generateContent call
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Request never produced a response body
    #[error("{0}")]
    Transport(String),

    /// Response body was not valid JSON
    #[error("{0}")]
    Decode(String),

    /// Gemini answered with an `error` object
    #[error("{message}")]
    Provider { message: String, details: Value },

    /// Gemini answered without any candidate text
    #[error("No response from Gemini")]
    EmptyCompletion { response: Value },
}

impl GeminiError {
    /// Interpret the `error` member of a provider response
    pub fn from_provider_error(details: Value) -> Self {
        let message = details
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_PROVIDER_ERROR)
            .to_string();
        GeminiError::Provider { message, details }
    }
}
