//! Statistics handler

use axum::{extract::State, Json};

use crate::models::DriverStatistics;
use crate::{AppResult, AppState};

/// Dataset-wide statistics
pub async fn get(State(state): State<AppState>) -> AppResult<Json<DriverStatistics>> {
    let stats = state.cache.get_statistics()?;
    Ok(Json(stats))
}
