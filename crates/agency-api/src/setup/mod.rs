//! Application setup and initialization
//!
//! Everything `main` needs to go from a loaded `Config` to a servable router, kept
//! here so tests can build the same router without binding a socket.

pub mod routes;
pub mod server;

use crate::state::AppState;
use agency_core::Config;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let (state, router) = build_app(config).await?;
    Ok((state, router))
}

/// Storage, state and routes, without telemetry
pub async fn build_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let storage = agency_storage::create_storage(&config)
        .await
        .context("Failed to initialize storage")?;

    let state = Arc::new(AppState::new(config.clone(), storage));
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
