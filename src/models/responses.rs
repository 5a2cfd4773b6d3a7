//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

const KEY_SET_MESSAGE: &str = "key set";
const KEY_FOUND_MESSAGE: &str = "key found";

/// Response body for the SET operation (POST /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    pub message: String,
}

impl SetResponse {
    pub fn new() -> Self {
        Self {
            message: KEY_SET_MESSAGE.to_string(),
        }
    }
}

impl Default for SetResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for the GET operation (GET /get)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub message: String,
    pub data: GetData,
}

/// Payload of a successful read
#[derive(Debug, Clone, Serialize)]
pub struct GetData {
    /// The value that was stored, now removed from the cache
    pub value: Value,
}

impl GetResponse {
    pub fn new(value: Value) -> Self {
        Self {
            message: KEY_FOUND_MESSAGE.to_string(),
            data: GetData { value },
        }
    }
}

/// One failed field in a validation error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Entries currently waiting to be read or to expire
    pub entries: usize,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(entries: usize) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_response_serialize() {
        let json = serde_json::to_value(SetResponse::new()).unwrap();
        assert_eq!(json, json!({"message": "key set"}));
    }

    #[test]
    fn test_get_response_serialize() {
        let json = serde_json::to_value(GetResponse::new(json!([1, 2]))).unwrap();
        assert_eq!(json, json!({"message": "key found", "data": {"value": [1, 2]}}));
    }

    #[test]
    fn test_get_response_null_value() {
        let json = serde_json::to_value(GetResponse::new(Value::Null)).unwrap();
        assert!(json["data"]["value"].is_null());
    }

    #[test]
    fn test_field_error_serialize() {
        let json = serde_json::to_value(FieldError::new("key", "cannot be blank")).unwrap();
        assert_eq!(json, json!({"field": "key", "message": "cannot be blank"}));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy(3);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
        assert!(json.contains("\"entries\":3"));
    }
}
