//! Unified error types for the podcastit API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core errors raised by entities, the entry store and the renderer
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed or missing URL, host-less URL, or a rejected feed name
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported feed type: {0}")]
    UnsupportedFormat(String),

    /// A stored record could not be read back into an entry
    #[error("Corrupt record in feed '{feed}' at line {line}: {reason}")]
    CorruptRecord {
        feed: String,
        line: u64,
        reason: String,
    },

    #[error("Storage error: {0}")]
    StorageIo(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

/// Error response body for JSON responses
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Domain(DomainError::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Domain(DomainError::UnsupportedFormat(kind)) => (
                StatusCode::BAD_REQUEST,
                format!("Unsupported feed type '{}', expected 'atom' or 'rss'", kind),
            ),
            AppError::Domain(e @ DomainError::CorruptRecord { .. }) => {
                tracing::error!("Corrupt feed log: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Feed log is corrupt".to_string(),
                )
            }
            AppError::Domain(DomainError::StorageIo(e)) => {
                tracing::error!("Storage error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Could not access feed storage".to_string(),
                )
            }
            AppError::Domain(DomainError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        (status, Json(MessageResponse { message })).into_response()
    }
}
