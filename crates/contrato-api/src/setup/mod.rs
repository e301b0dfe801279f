//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;
pub mod validation;

use crate::journal::ConsoleJournal;
use crate::state::AppState;
use anyhow::{Context, Result};
use contrato_core::Config;
use contrato_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    crate::telemetry::init_telemetry()?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let storage = LocalStorage::new(config.upload_dir())
        .await
        .with_context(|| {
            format!(
                "Failed to prepare upload directory {}",
                config.upload_dir().display()
            )
        })?;
    tracing::info!(location = %storage.location(), "Upload storage ready");

    let state = Arc::new(AppState::new(
        config.clone(),
        Arc::new(storage),
        Arc::new(ConsoleJournal),
    ));

    let router = routes::setup_routes(&config, state.clone()).await?;

    Ok((state, router))
}
