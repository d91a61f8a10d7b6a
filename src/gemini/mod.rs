// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gemini generative-language API client

pub mod client;
pub mod provider;
pub mod types;

pub use client::GeminiClient;
pub use provider::ContentGenerator;
pub use types::{
    GeminiError, GenerateContentRequest, GenerationConfig, GenerationInput, InlineData, Part,
    UsageMetadata,
};
