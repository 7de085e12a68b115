//! LOLDrivers Catalog
//!
//! Searchable catalog service for the LOLDrivers dataset of known
//! vulnerable and malicious Windows drivers.
//!
//! # Architecture
//!
//! ```text
//! drivers.json ──> Normalizer ──> DriverSample sequence
//!                                      │
//!                    ┌─────────────────┼──────────────────┐
//!                    ▼                 ▼                  ▼
//!              Statistics       Filter Engine       Search Engine
//!              Aggregator              └────────┬─────────┘
//!                    │                          ▼
//!                    └──────────────►     Cache Manager
//!                                    (TTL snapshot + memoized queries)
//!                                               │
//!                                               ▼
//!                                      HTTP route layer (axum)
//! ```
//!
//! The core lives in [`logic`] so the server and any client-side mirror
//! share a single implementation of the predicates and search fields.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod models;

pub use error::{AppError, AppResult};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use config::Config;
use logic::cache::DriverCache;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<DriverCache>,
    pub config: Config,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/drivers", get(handlers::drivers::list))
        .route("/api/drivers/search", get(handlers::drivers::search))
        .route("/api/stats", get(handlers::stats::get))
        .route("/api/cache/clear", post(handlers::cache::clear))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
