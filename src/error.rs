//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;

pub type AppResult<T> = Result<T, AppError>;

/// Library-level failures raised by the cache manager. Malformed-but-valid
/// JSON is not an error (it degrades to an empty dataset); only a missing
/// file or unparseable JSON reaches the caller.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("driver dataset unavailable at {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("driver dataset is not valid JSON: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// HTTP-surface errors.
#[derive(Debug)]
pub enum AppError {
    DatasetUnavailable(String),
    DatasetMalformed(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::DatasetUnavailable(msg) => {
                tracing::error!("Dataset unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, "Driver dataset unavailable")
            }
            AppError::DatasetMalformed(msg) => {
                tracing::error!("Dataset malformed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Driver dataset could not be parsed")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<CacheError> for AppError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::SourceUnavailable { .. } => AppError::DatasetUnavailable(err.to_string()),
            CacheError::ParseError(_) => AppError::DatasetMalformed(err.to_string()),
        }
    }
}
