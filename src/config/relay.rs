// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Relay configuration

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_API_VERSION: &str = "v1beta";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4096;
pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/jpeg";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Maximum inbound body size (10MB, base64 images included)
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Errors raised by [`RelayConfig::validate`]
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid listen address '{0}'")]
    ListenAddr(String),

    #[error("invalid Gemini API base URL '{url}': {reason}")]
    BaseUrl { url: String, reason: String },

    #[error("model name must not be empty")]
    EmptyModel,

    #[error("temperature must be between 0.0 and 2.0, got {0}")]
    Temperature(f32),

    #[error("max_output_tokens must be greater than 0")]
    MaxOutputTokens,

    #[error("request timeout must be greater than 0")]
    Timeout,

    #[error("max_body_bytes must be greater than 0")]
    BodyLimit,
}

/// Configuration for the relay server and its Gemini upstream
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Address the HTTP server binds to
    pub listen_addr: String,
    /// Gemini API key. The server starts without one and answers every
    /// generate request with a configuration error.
    pub api_key: Option<String>,
    /// Gemini model id, e.g. "gemini-2.0-flash"
    pub model: String,
    /// Scheme and host of the Gemini API
    pub api_base_url: String,
    /// API version path segment
    pub api_version: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// MIME type declared for inline image data
    pub image_mime_type: String,
    /// Timeout for the outbound Gemini call in seconds
    pub request_timeout_secs: u64,
    /// Maximum accepted inbound body size in bytes
    pub max_body_bytes: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            image_mime_type: DEFAULT_IMAGE_MIME_TYPE.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl RelayConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.listen_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::ListenAddr(self.listen_addr.clone()))?;

        let url = Url::parse(&self.api_base_url).map_err(|e| ConfigError::BaseUrl {
            url: self.api_base_url.clone(),
            reason: e.to_string(),
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::BaseUrl {
                url: self.api_base_url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Temperature(self.temperature));
        }
        if self.max_output_tokens == 0 {
            return Err(ConfigError::MaxOutputTokens);
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Timeout);
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::BodyLimit);
        }
        Ok(())
    }

    /// True when a non-blank API key is present
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// URL of the generateContent method, without the key query parameter
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.api_base_url.trim_end_matches('/'),
            self.api_version.trim_matches('/'),
            self.model
        )
    }
}
