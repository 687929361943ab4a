//! Response DTOs for the session store API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::session::StoreStats;

/// Summary of one live session (GET /sessions/:id, POST /sessions/:id)
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    /// Session identifier
    pub id: String,
    /// Creation time in ISO 8601 format
    pub created_at: String,
    /// Milliseconds since the last access
    pub idle_ms: u64,
    /// Number of stored keys
    pub keys: usize,
}

impl SessionResponse {
    pub fn new(
        id: impl Into<String>,
        created_at: DateTime<Utc>,
        idle: Duration,
        keys: usize,
    ) -> Self {
        Self {
            id: id.into(),
            created_at: created_at.to_rfc3339(),
            idle_ms: idle.as_millis() as u64,
            keys,
        }
    }
}

/// Response body for reading a session value (GET /sessions/:id/values/:key)
///
/// `value` is null when the key was never set.
#[derive(Debug, Clone, Serialize)]
pub struct ValueResponse {
    pub session_id: String,
    pub key: String,
    pub value: Value,
}

impl ValueResponse {
    pub fn new(session_id: impl Into<String>, key: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            session_id: session_id.into(),
            key: key.into(),
            value: value.unwrap_or(Value::Null),
        }
    }
}

/// Response body for operations that only report success
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Success message
    pub message: String,
}

impl MessageResponse {
    /// Message for a stored value
    pub fn value_set(session_id: &str, key: &str) -> Self {
        Self {
            message: format!("Key '{}' set in session '{}'", key, session_id),
        }
    }

    /// Message for a deleted value
    pub fn value_deleted(session_id: &str, key: &str) -> Self {
        Self {
            message: format!("Key '{}' deleted from session '{}'", key, session_id),
        }
    }

    /// Message for a destroyed session
    pub fn session_destroyed(session_id: &str) -> Self {
        Self {
            message: format!("Session '{}' destroyed", session_id),
        }
    }
}

/// Response body for a garbage collection sweep (POST /gc)
#[derive(Debug, Clone, Serialize)]
pub struct GcResponse {
    /// Number of sessions evicted by this sweep
    pub evicted: usize,
    /// Live sessions after the sweep
    pub remaining: usize,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Active session engine
    pub provider: String,
    #[serde(flatten)]
    pub stats: StoreStats,
}

impl StatsResponse {
    pub fn new(provider: impl Into<String>, stats: StoreStats) -> Self {
        Self {
            provider: provider.into(),
            stats,
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
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
