// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use clap::Parser;

use crate::config::relay::{
    RelayConfig, DEFAULT_API_BASE_URL, DEFAULT_API_VERSION, DEFAULT_IMAGE_MIME_TYPE,
    DEFAULT_LISTEN_ADDR, DEFAULT_MAX_BODY_BYTES, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS,
};

/// Fabstir Gemini Relay
#[derive(Parser, Debug)]
#[command(name = "fabstir-gemini-relay")]
#[command(version = crate::version::VERSION_NUMBER)]
#[command(about = "HTTP relay that forwards prompts to the Gemini API", long_about = None)]
pub struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, env = "LISTEN_ADDR", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: String,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini model id
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Gemini API base URL
    #[arg(long, env = "GEMINI_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Gemini API version segment
    #[arg(long, env = "GEMINI_API_VERSION", default_value = DEFAULT_API_VERSION)]
    pub api_version: String,

    /// Sampling temperature
    #[arg(long, env = "GEMINI_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Maximum tokens Gemini may generate
    #[arg(long, env = "GEMINI_MAX_OUTPUT_TOKENS", default_value_t = DEFAULT_MAX_OUTPUT_TOKENS)]
    pub max_output_tokens: u32,

    /// MIME type declared for inline images
    #[arg(long, env = "GEMINI_IMAGE_MIME_TYPE", default_value = DEFAULT_IMAGE_MIME_TYPE)]
    pub image_mime_type: String,

    /// Timeout for the Gemini call, in seconds
    #[arg(long, env = "GEMINI_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Maximum inbound request body size, in bytes
    #[arg(long, env = "MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

impl Cli {
    pub fn into_config(self) -> RelayConfig {
        RelayConfig {
            listen_addr: self.listen_addr,
            api_key: self.api_key.filter(|k| !k.trim().is_empty()),
            model: self.model,
            api_base_url: self.api_base_url,
            api_version: self.api_version,
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            image_mime_type: self.image_mime_type,
            request_timeout_secs: self.timeout_secs,
            max_body_bytes: self.max_body_bytes,
        }
    }
}
