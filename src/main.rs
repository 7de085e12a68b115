//! LOLDrivers Catalog server
//!
//! Thin HTTP front over the in-memory dataset cache: loads the drivers
//! dataset once, serves paginated/filterable listings and dataset-wide
//! statistics.

use loldrivers_catalog::{config::Config, create_router, logic::cache::DriverCache, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging; production defaults to a quieter filter
    let default_filter = if config.is_production() {
        "loldrivers_catalog=info,tower_http=info"
    } else {
        "loldrivers_catalog=debug,tower_http=debug"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("LOLDrivers Catalog server starting...");
    tracing::info!("Dataset file: {}", config.data_file.display());

    let cache = Arc::new(DriverCache::from_config(&config));

    // Warm the cache so the first request does not pay the parse cost. A
    // missing file is not fatal here: the load error is surfaced per
    // request and retried on the next access.
    match cache.load_drivers() {
        Ok(samples) => tracing::info!("Loaded {} driver samples", samples.len()),
        Err(err) => tracing::warn!("Dataset not loaded at startup: {}", err),
    }

    let state = AppState {
        cache,
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
