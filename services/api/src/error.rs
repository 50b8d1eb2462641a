//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service and its
//! mapping onto HTTP responses.

use crate::config::ConfigError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use courseware_core::ports::PortError;
use serde_json::json;
use tracing::error;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("{0}")]
    Port(#[from] PortError),

    /// Represents an error from the underlying database library.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

impl ApiError {
    /// The HTTP status and stable machine-readable kind for this error.
    /// Each `PortError` variant maps to exactly one status so clients can
    /// tell a retryable storage failure (502) from a permanent validation
    /// failure (400).
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Port(PortError::Validation(_)) => (StatusCode::BAD_REQUEST, "validation"),
            ApiError::Port(PortError::Unauthorized) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::Port(PortError::Forbidden(_)) => (StatusCode::FORBIDDEN, "forbidden"),
            ApiError::Port(PortError::NotFound(_)) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Port(PortError::Storage(_)) => (StatusCode::BAD_GATEWAY, "storage"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        if status.is_server_error() {
            error!("request failed: {:?}", self);
        }
        let body = Json(json!({
            "error": kind,
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}
