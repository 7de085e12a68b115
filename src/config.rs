//! Configuration module

use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the drivers dataset JSON file
    pub data_file: PathBuf,

    /// Server port
    pub port: u16,

    /// Dataset snapshot time-to-live in seconds
    pub cache_ttl_secs: u64,

    /// Memoized search result time-to-live in seconds
    pub search_cache_ttl_secs: u64,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            data_file: env::var("DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/drivers.json")),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            cache_ttl_secs: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(300),

            search_cache_ttl_secs: env::var("SEARCH_CACHE_TTL_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(30),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/drivers.json"),
            port: 8080,
            cache_ttl_secs: 300,
            search_cache_ttl_secs: 30,
            environment: "development".to_string(),
        }
    }
}
