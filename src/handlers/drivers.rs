//! Driver listing and search handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::logic::cache::{DriverPage, SearchPage};
use crate::{AppResult, AppState};

const DEFAULT_LIMIT: usize = 50;

#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SearchQuery {
    pub q: Option<String>,
    /// Comma-separated filter names, e.g. `hvci,killer`
    pub filters: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// List drivers, paginated
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<DriverPage>> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    let result = state.cache.get_drivers(page, limit)?;
    Ok(Json(result))
}

/// Search drivers with optional named filters, paginated
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<SearchPage>> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let q = query.q.unwrap_or_default();

    let filters: Vec<String> = query
        .filters
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    let result = state.cache.search_drivers(&q, &filters, page, limit)?;
    Ok(Json(result))
}
