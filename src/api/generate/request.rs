// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generate request decoding and validation

use serde_json::{Map, Value};

use crate::api::errors::ApiError;
use crate::gemini::GenerationInput;

/// Label echoed back when the client sends no `type`
pub const DEFAULT_RESPONSE_TYPE: &str = "text";

/// Inbound relay request
///
/// Every field is optional on the wire. Empty strings and values of the
/// wrong JSON type are treated as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateRequest {
    /// Text prompt (required)
    pub prompt: Option<String>,

    /// Base64-encoded image for vision prompts
    pub image: Option<String>,

    /// Caller-defined label echoed in the response (`type` on the wire)
    pub kind: Option<String>,
}

fn string_field(map: &Map<String, Value>, name: &str) -> Option<String> {
    map.get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl GenerateRequest {
    /// Decode a raw request body
    ///
    /// An empty body, `null` or any non-object JSON yields an empty request.
    /// A body that is itself a JSON string is decoded once more, for clients
    /// that double-encode.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let mut value: Value =
            serde_json::from_slice(body).map_err(|e| ApiError::InvalidJson(e.to_string()))?;
        if let Value::String(inner) = &value {
            value = serde_json::from_str(inner).map_err(|e| ApiError::InvalidJson(e.to_string()))?;
        }

        Ok(match value {
            Value::Object(map) => Self {
                prompt: string_field(&map, "prompt"),
                image: string_field(&map, "image"),
                kind: string_field(&map, "type"),
            },
            _ => Self::default(),
        })
    }

    /// The `type` label to echo back
    pub fn response_type(&self) -> &str {
        self.kind.as_deref().unwrap_or(DEFAULT_RESPONSE_TYPE)
    }

    /// Build generator input, failing when no prompt was supplied
    pub fn to_input(&self) -> Result<GenerationInput, ApiError> {
        let prompt = self.prompt.as_ref().ok_or(ApiError::MissingPrompt)?;
        Ok(GenerationInput {
            prompt: prompt.clone(),
            image: self.image.clone(),
        })
    }
}
