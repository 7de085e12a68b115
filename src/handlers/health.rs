//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
    timestamp: i64,
    /// Whether a valid dataset snapshot is currently in memory.
    dataset_loaded: bool,
    /// Sample count of that snapshot (0 while the cache is empty).
    samples: usize,
}

/// Liveness check plus a peek at the dataset cache state.
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let samples = state.cache.snapshot_size();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        timestamp: chrono::Utc::now().timestamp(),
        dataset_loaded: samples.is_some(),
        samples: samples.unwrap_or(0),
    })
}
