//! Prediction service
//!
//! Minimal axum shell over the frozen bundle: `POST /predict` maps one JSON
//! record to a prediction, `GET /health` and `GET /metrics` expose liveness
//! and request counters. Pipeline errors are translated into status codes
//! here, once, and nowhere else.

mod handlers;
mod state;

pub use handlers::{health, metrics, predict};
pub use state::{AppState, Counters};

use crate::config::AppConfig;
use crate::error::{Error, Result};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    pub data: Option<T>,
    /// Error message (if failed)
    pub error: Option<String>,
    /// Request ID for log correlation
    pub request_id: String,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T, request_id: &str) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            request_id: request_id.to_string(),
        }
    }

    /// Create error response
    pub fn error(message: &str, request_id: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.to_string()),
            request_id: request_id.to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Crate version
    pub version: String,
    /// Uptime in seconds
    pub uptime_secs: u64,
    /// Whether the bundle has been loaded into the cache yet
    pub bundle_loaded: bool,
}

/// Request counter snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsResponse {
    /// Prediction requests received
    pub requests_total: u64,
    /// Predictions served successfully
    pub predictions_total: u64,
    /// Prediction requests that failed
    pub errors_total: u64,
}

/// Status code for a pipeline error surfacing at the request boundary.
///
/// A missing artifact means the service cannot serve yet (503, "run training
/// first"); integrity and schema failures are the request's data being
/// irreconcilable with the deployed schema (422); anything else is internal.
pub fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::ArtifactMissing { .. } => StatusCode::SERVICE_UNAVAILABLE,
        Error::SchemaMismatch(_) | Error::DataIntegrity(_) | Error::Data(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the service router over an application state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(handlers::predict))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub fn run_server(config: &AppConfig) -> Result<()> {
    let addr: SocketAddr = config
        .server
        .address
        .parse()
        .map_err(|e| Error::Config(format!("invalid server address: {e}")))?;

    let state = AppState::new(config.artifacts.bundle_path.clone());
    let app = router(state);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await
    })?;

    Ok(())
}
