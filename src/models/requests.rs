//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{CacheError, Result};
use crate::models::FieldError;

const BLANK_MESSAGE: &str = "cannot be blank";

/// Request body for the SET operation (POST /set)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetRequest {
    /// The cache key
    #[serde(default)]
    pub key: String,
    /// The value to store, any JSON
    #[serde(default)]
    pub value: Value,
}

impl SetRequest {
    /// Validates the request data
    pub fn validate(&self) -> Result<()> {
        validate_key(&self.key)
    }
}

/// Request body for the GET operation (GET /get)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetRequest {
    /// The cache key
    #[serde(default)]
    pub key: String,
}

impl GetRequest {
    /// Validates the request data
    pub fn validate(&self) -> Result<()> {
        validate_key(&self.key)
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::Validation(vec![FieldError::new(
            "key",
            BLANK_MESSAGE,
        )]));
    }
    Ok(())
}

/// Decodes a JSON request body.
///
/// An empty body decodes to the request's default so that it is reported
/// as a validation failure rather than a decoding one.
pub fn decode<T>(body: &[u8]) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body)
        .map_err(|e| CacheError::InvalidRequest(format!("unable to decode body: {}", e)))
}
