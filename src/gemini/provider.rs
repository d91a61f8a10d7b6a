// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Content generator trait definition

use async_trait::async_trait;

use super::types::{GeminiError, GenerationInput};

/// Anything that turns a prompt (and optional image) into completion text
///
/// The relay handler only depends on this trait, so tests can swap the
/// real Gemini client for a stub.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Run a single generation and return the first candidate's text
    async fn generate(&self, input: &GenerationInput) -> Result<String, GeminiError>;

    /// Model name for logging and health output
    fn model_name(&self) -> &str;
}
