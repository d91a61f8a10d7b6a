// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use fabstir_gemini_relay::{api::start_server, cli::Cli, version};
use std::env;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up GEMINI_API_KEY and friends from a local .env
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = Cli::parse().into_config();
    config.validate()?;

    info!("Starting {}", version::get_version_string());
    info!(
        "Model: {}, API base: {}, API key configured: {}",
        config.model,
        config.api_base_url,
        config.has_api_key()
    );

    start_server(config).await
}
