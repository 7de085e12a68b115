//! Cache control handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct ClearResponse {
    cleared: bool,
    timestamp: i64,
}

/// Invalidate all cached state; the next access reloads the dataset.
pub async fn clear(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.clear_cache();
    tracing::info!("Cache cleared by request");

    Json(ClearResponse {
        cleared: true,
        timestamp: chrono::Utc::now().timestamp(),
    })
}
