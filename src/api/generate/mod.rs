// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gemini relay endpoint module
//!
//! Provides POST /api/gemini, forwarding a prompt and optional image to
//! Gemini and returning `{"result", "type"}`.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{generate_handler, method_not_allowed_handler};
pub use request::GenerateRequest;
pub use response::GenerateResponse;

/// Route path served by the relay
pub const GENERATE_PATH: &str = "/api/gemini";
