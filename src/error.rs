//! Error types for the cache server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::FieldError;

/// Message returned for every validation failure.
pub const VALIDATION_ERROR_MESSAGE: &str = "you have validation errors";

/// Message returned when a key is absent, consumed or expired.
pub const NOT_FOUND_MESSAGE: &str = "key not found";

const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

// == Cache Error Enum ==
/// Unified error type for the cache server.
///
/// The store itself only ever produces [`CacheError::NotFound`]; the other
/// variants belong to the HTTP layer.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key is absent, already consumed, or expired
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Request decoded but failed field validation
    #[error("you have validation errors")]
    Validation(Vec<FieldError>),

    /// Request body could not be decoded
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            CacheError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                json!({ "message": NOT_FOUND_MESSAGE }),
            ),
            CacheError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "message": VALIDATION_ERROR_MESSAGE, "errors": errors }),
            ),
            CacheError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "message": msg }))
            }
            CacheError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": INTERNAL_ERROR_MESSAGE }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;
