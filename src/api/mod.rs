// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod generate;
pub mod http_server;

pub use errors::{ApiError, ErrorResponse};
pub use generate::{generate_handler, GenerateRequest, GenerateResponse, GENERATE_PATH};
pub use http_server::{create_app, start_server, AppState, HealthResponse};
