// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gemini relay endpoint handlers

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};
use tracing::{error, warn};

use super::request::GenerateRequest;
use super::response::GenerateResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

/// POST /api/gemini - Relay a prompt (and optional image) to Gemini
///
/// Checks run in a fixed order: body reading and decoding, API key presence,
/// prompt presence. A body over the size limit is rejected in the JSON error
/// envelope with its 413 status. Provider failures come back as 500 with the
/// provider's error object or raw response under `details`.
pub async fn generate_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let body = body.map_err(|rejection| {
        warn!("Rejected request body: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;
    let request = GenerateRequest::from_body(&body)?;

    let generator = state.generator.as_ref().ok_or_else(|| {
        error!("GEMINI_API_KEY not found in configuration");
        ApiError::ApiKeyNotConfigured
    })?;

    let input = request.to_input()?;

    let text = generator.generate(&input).await.map_err(|e| {
        warn!("Gemini relay failed: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(GenerateResponse::new(text, request.response_type())))
}

/// Any method other than POST on /api/gemini. OPTIONS never gets here, the
/// CORS layer answers it.
pub async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}
