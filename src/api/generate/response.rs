// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generate response envelope

use serde::{Deserialize, Serialize};

/// Successful relay response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateResponse {
    /// Completion text from the first candidate
    pub result: String,
    /// The request's `type`, or "text"
    #[serde(rename = "type")]
    pub kind: String,
}

impl GenerateResponse {
    pub fn new(result: String, kind: &str) -> Self {
        Self {
            result,
            kind: kind.to_string(),
        }
    }
}
