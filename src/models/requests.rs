//! Request DTOs for the session store API
//!
//! Defines the structure of incoming HTTP request bodies and path validation.

use serde::Deserialize;
use serde_json::Value;

use crate::session::{MAX_ID_LENGTH, MAX_KEY_LENGTH};

/// Request body for storing a session value (PUT /sessions/:id/values/:key)
#[derive(Debug, Clone, Deserialize)]
pub struct SetValueRequest {
    /// Arbitrary JSON value to store
    pub value: Value,
}

/// Request body for a manual garbage collection sweep (POST /gc)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GcRequest {
    /// Idle TTL in seconds (uses the configured TTL if not specified)
    #[serde(default)]
    pub ttl: Option<u64>,
}

/// Validates a session id taken from the request path.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_session_id(id: &str) -> Option<String> {
    if id.is_empty() {
        return Some("Session id cannot be empty".to_string());
    }
    if id.len() > MAX_ID_LENGTH {
        return Some(format!(
            "Session id exceeds maximum length of {} bytes",
            MAX_ID_LENGTH
        ));
    }
    None
}

/// Validates a value key taken from the request path.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}
