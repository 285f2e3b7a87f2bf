//! HTTP request handlers

use crate::infer::{predict_record, PredictionResult};
use crate::server::{ApiResponse, AppState, HealthResponse, MetricsResponse};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use std::sync::atomic::Ordering;

/// Generate a request ID
fn request_id() -> String {
    format!("req-{:016x}", rand::random::<u64>())
}

/// Predict handler: one raw JSON record in, one prediction out
pub async fn predict(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> (StatusCode, Json<ApiResponse<PredictionResult>>) {
    let req_id = request_id();
    state.counters.requests.fetch_add(1, Ordering::Relaxed);

    let Some(record) = payload.as_object() else {
        state.counters.errors.fetch_add(1, Ordering::Relaxed);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                "request body must be a JSON object of raw fields",
                &req_id,
            )),
        );
    };

    let outcome = state
        .cache
        .get_or_load(state.bundle_path.as_path())
        .and_then(|bundle| predict_record(&bundle, record));

    match outcome {
        Ok(result) => {
            state.counters.predictions.fetch_add(1, Ordering::Relaxed);
            (StatusCode::OK, Json(ApiResponse::success(result, &req_id)))
        }
        Err(e) => {
            state.counters.errors.fetch_add(1, Ordering::Relaxed);
            eprintln!("[{req_id}] predict failed: {e}");
            (
                crate::server::status_for(&e),
                Json(ApiResponse::error(&e.to_string(), &req_id)),
            )
        }
    }
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let health = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
        bundle_loaded: state.cache.is_loaded(),
    };

    (StatusCode::OK, Json(health))
}

/// Counter snapshot handler
pub async fn metrics(State(state): State<AppState>) -> (StatusCode, Json<MetricsResponse>) {
    let snapshot = MetricsResponse {
        requests_total: state.counters.requests.load(Ordering::Relaxed),
        predictions_total: state.counters.predictions.load(Ordering::Relaxed),
        errors_total: state.counters.errors.load(Ordering::Relaxed),
    };

    (StatusCode::OK, Json(snapshot))
}
