// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, Method},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use super::generate::{generate_handler, method_not_allowed_handler, GENERATE_PATH};
use crate::config::RelayConfig;
use crate::gemini::{ContentGenerator, GeminiClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    /// None when no API key is configured
    pub generator: Option<Arc<dyn ContentGenerator>>,
}

impl AppState {
    pub fn new(config: RelayConfig, generator: Option<Arc<dyn ContentGenerator>>) -> Self {
        Self {
            config: Arc::new(config),
            generator,
        }
    }

    /// Build state with a real Gemini client when an API key is configured
    pub fn from_config(config: RelayConfig) -> Result<Self> {
        let generator: Option<Arc<dyn ContentGenerator>> = if config.has_api_key() {
            Some(Arc::new(GeminiClient::new(&config)?))
        } else {
            warn!("GEMINI_API_KEY not set; relay requests will fail until it is configured");
            None
        };
        Ok(Self::new(config, generator))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model: String,
    pub api_key_configured: bool,
}

/// Any OPTIONS request is answered here with an empty 200
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn create_app(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route(
            GENERATE_PATH,
            post(generate_handler).fallback(method_not_allowed_handler),
        )
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: RelayConfig) -> Result<()> {
    let addr: SocketAddr = config.listen_addr.parse()?;
    let state = AppState::from_config(config)?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "Gemini relay listening on {} ({})",
        listener.local_addr()?,
        GENERATE_PATH
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gemini relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::version::VERSION_NUMBER.to_string(),
        model: state
            .generator
            .as_ref()
            .map(|g| g.model_name().to_string())
            .unwrap_or_else(|| state.config.model.clone()),
        api_key_configured: state.generator.is_some(),
    })
}
