// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gemini::GeminiError;

/// Error envelope returned by every failing relay request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Body could not be read, e.g. it exceeds the configured limit
    #[error("{message}")]
    BodyRejected { status: StatusCode, message: String },

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Prompt is required")]
    MissingPrompt,

    #[error("GEMINI_API_KEY not configured")]
    ApiKeyNotConfigured,

    #[error("{message}")]
    Upstream {
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("{0}")]
    InternalError(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::BodyRejected { status, .. } => *status,
            ApiError::InvalidJson(_) | ApiError::MissingPrompt => StatusCode::BAD_REQUEST,
            ApiError::ApiKeyNotConfigured
            | ApiError::Upstream { .. }
            | ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let details = match self {
            ApiError::Upstream { details, .. } => details.clone(),
            _ => None,
        };
        ErrorResponse {
            error: self.to_string(),
            details,
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::BodyRejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<GeminiError> for ApiError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Provider { message, details } => ApiError::Upstream {
                message,
                details: Some(details),
            },
            GeminiError::EmptyCompletion { response } => ApiError::Upstream {
                message: "No response from Gemini".to_string(),
                details: Some(response),
            },
            GeminiError::Transport(message) | GeminiError::Decode(message) => {
                ApiError::InternalError(message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response())).into_response()
    }
}
