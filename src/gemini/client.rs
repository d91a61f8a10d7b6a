// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gemini generateContent client

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

use super::provider::ContentGenerator;
use super::types::{
    finish_reason, first_candidate_text, is_truthy, GeminiError, GenerateContentRequest,
    GenerationConfig, GenerationInput, UsageMetadata,
};
use crate::config::RelayConfig;

/// Client for the Gemini generateContent REST method
pub struct GeminiClient {
    client: Client,
    api_key: String,
    url: String,
    model_name: String,
    image_mime_type: String,
    generation_config: GenerationConfig,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a new GeminiClient from relay configuration
    ///
    /// Fails when the configuration carries no API key.
    pub fn new(config: &RelayConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| anyhow::anyhow!("GEMINI_API_KEY not configured"))?
            .to_string();

        let timeout = config.request_timeout();
        let client = Client::builder().timeout(timeout).build()?;

        let url = config.generate_content_url();
        info!(
            "Gemini client configured: url={}, model={}, timeout={}s",
            url,
            config.model,
            timeout.as_secs()
        );

        Ok(Self {
            client,
            api_key,
            url,
            model_name: config.model.clone(),
            image_mime_type: config.image_mime_type.clone(),
            generation_config: GenerationConfig {
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
            },
            timeout,
        })
    }

    /// Endpoint URL without the key parameter
    pub fn url(&self) -> &str {
        &self.url
    }

    fn transport_error(&self, e: reqwest::Error) -> GeminiError {
        if e.is_timeout() {
            GeminiError::Transport(format!(
                "Gemini request timed out after {}s",
                self.timeout.as_secs()
            ))
        } else {
            // Drop the URL so the key query parameter never reaches logs or clients
            GeminiError::Transport(e.without_url().to_string())
        }
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate(&self, input: &GenerationInput) -> Result<String, GeminiError> {
        let request = GenerateContentRequest::new(
            input,
            &self.image_mime_type,
            self.generation_config.clone(),
        );

        info!(
            "Calling Gemini API... model={}, image={}",
            self.model_name,
            input.image.is_some()
        );
        let start = std::time::Instant::now();

        let response = self
            .client
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        let data: Value = serde_json::from_slice(&body).map_err(|e| {
            error!("Gemini returned non-JSON body (HTTP {}): {}", status, e);
            GeminiError::Decode(format!(
                "Invalid JSON from Gemini (HTTP {}): {}",
                status.as_u16(),
                e
            ))
        })?;

        if let Some(provider_error) = data.get("error").filter(|v| is_truthy(v)) {
            error!("Gemini API error: {}", provider_error);
            return Err(GeminiError::from_provider_error(provider_error.clone()));
        }

        let text = match first_candidate_text(&data) {
            Some(text) => text.to_string(),
            None => {
                error!("No text in Gemini response: {}", data);
                return Err(GeminiError::EmptyCompletion { response: data });
            }
        };

        if let Some(usage) = UsageMetadata::from_response(&data) {
            debug!(
                "Gemini usage: prompt={}, candidates={}, total={}, finish_reason={:?}",
                usage.prompt_token_count,
                usage.candidates_token_count,
                usage.total_token_count,
                finish_reason(&data)
            );
        }
        info!(
            "Gemini response received, length: {} ({}ms)",
            text.len(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
