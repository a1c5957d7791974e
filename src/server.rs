//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::ExportService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub export_service: Arc<ExportService>,
}

/// Create application state from a loaded configuration.
pub fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    if let Some(dir) = &config.fonts_dir {
        if !dir.is_dir() {
            anyhow::bail!("fonts_dir {} is not a directory", dir.display());
        }
    }

    let export_service = Arc::new(ExportService::new(&config));

    Ok(AppState {
        config: Arc::new(config),
        export_service,
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        // Export endpoints
        .route("/api/export", post(handle_export))
        .route("/api/export/print", post(handle_print_export))
        .route("/api/placement", post(api::handle_placement))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        // Designs arrive base64-encoded in the JSON body
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_export(
    axum::extract::State(state): axum::extract::State<AppState>,
    payload: Result<
        axum::Json<api::ExportRequest>,
        axum::extract::rejection::JsonRejection,
    >,
) -> Result<axum::Json<api::ExportResponse>, ApiError> {
    api::handle_export(axum::extract::State(state.export_service), payload).await
}

async fn handle_print_export(
    axum::extract::State(state): axum::extract::State<AppState>,
    payload: Result<
        axum::Json<api::ExportRequest>,
        axum::extract::rejection::JsonRejection,
    >,
) -> Result<axum::Json<api::ExportResponse>, ApiError> {
    api::handle_print_export(
        axum::extract::State(state.config),
        axum::extract::State(state.export_service),
        payload,
    )
    .await
}
