//! API Handlers
//!
//! HTTP request handlers for each session store endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{Result, SessionError};
use crate::models::{
    validate_key, validate_session_id, GcRequest, GcResponse, HealthResponse, MessageResponse,
    SessionResponse, SetValueRequest, StatsResponse, ValueResponse,
};
use crate::session::{MemoryStore, Session, SessionProvider, MEMORY_PROVIDER};

/// Application state shared across all handlers.
///
/// Holds the session engine selected at startup.
#[derive(Clone)]
pub struct AppState {
    /// Session storage engine
    pub sessions: Arc<dyn SessionProvider>,
    /// Registry name of the engine
    pub provider: String,
    /// TTL used by sweeps that do not specify one
    pub default_ttl: Duration,
}

impl AppState {
    /// Creates a new AppState around the given engine.
    pub fn new(
        sessions: Arc<dyn SessionProvider>,
        provider: impl Into<String>,
        default_ttl: Duration,
    ) -> Self {
        Self {
            sessions,
            provider: provider.into(),
            default_ttl,
        }
    }

    /// AppState over a fresh in-memory engine.
    pub fn in_memory(default_ttl: Duration) -> Self {
        let store: MemoryStore = MemoryStore::new();
        Self::new(Arc::new(store), MEMORY_PROVIDER, default_ttl)
    }
}

fn check_id(id: &str) -> Result<()> {
    match validate_session_id(id) {
        Some(msg) => Err(SessionError::InvalidRequest(msg)),
        None => Ok(()),
    }
}

fn check_key(key: &str) -> Result<()> {
    match validate_key(key) {
        Some(msg) => Err(SessionError::InvalidRequest(msg)),
        None => Ok(()),
    }
}

fn summarize(state: &AppState, session: &Session) -> SessionResponse {
    let idle = state.sessions.idle_time(session.id()).unwrap_or_default();
    SessionResponse::new(session.id(), session.created_at(), idle, session.len())
}

/// Handler for POST /sessions/:id
///
/// Creates a new empty session; 409 if the id is already live.
pub async fn create_session_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>> {
    check_id(&id)?;

    let session = state.sessions.init(&id)?;

    Ok(Json(summarize(&state, &session)))
}

/// Handler for GET /sessions/:id
///
/// Describes a live session without creating or touching it.
pub async fn get_session_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>> {
    check_id(&id)?;

    let session = state
        .sessions
        .lookup(&id)
        .ok_or_else(|| SessionError::NotFound(id.clone()))?;

    Ok(Json(summarize(&state, &session)))
}

/// Handler for DELETE /sessions/:id
///
/// Destroying an unknown session still succeeds.
pub async fn destroy_session_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    check_id(&id)?;

    state.sessions.destroy(&id)?;

    Ok(Json(MessageResponse::session_destroyed(&id)))
}

/// Handler for PUT /sessions/:id/values/:key
///
/// Stores a value, creating the session on first reference.
pub async fn set_value_handler(
    State(state): State<AppState>,
    Path((id, key)): Path<(String, String)>,
    Json(req): Json<SetValueRequest>,
) -> Result<Json<MessageResponse>> {
    check_id(&id)?;
    check_key(&key)?;

    let session = state.sessions.read(&id)?;
    session.set(key.clone(), req.value);

    Ok(Json(MessageResponse::value_set(&id, &key)))
}

/// Handler for GET /sessions/:id/values/:key
///
/// Returns null for keys that were never set.
pub async fn get_value_handler(
    State(state): State<AppState>,
    Path((id, key)): Path<(String, String)>,
) -> Result<Json<ValueResponse>> {
    check_id(&id)?;
    check_key(&key)?;

    let session = state.sessions.read(&id)?;
    let value = session.get(key.as_str());

    Ok(Json(ValueResponse::new(id, key, value)))
}

/// Handler for DELETE /sessions/:id/values/:key
pub async fn delete_value_handler(
    State(state): State<AppState>,
    Path((id, key)): Path<(String, String)>,
) -> Result<Json<MessageResponse>> {
    check_id(&id)?;
    check_key(&key)?;

    let session = state.sessions.read(&id)?;
    session.delete(key.as_str());

    Ok(Json(MessageResponse::value_deleted(&id, &key)))
}

/// Handler for POST /gc
///
/// Runs one garbage collection sweep.
pub async fn gc_handler(
    State(state): State<AppState>,
    Json(req): Json<GcRequest>,
) -> Json<GcResponse> {
    let ttl = req
        .ttl
        .map(Duration::from_secs)
        .unwrap_or(state.default_ttl);

    let evicted = state.sessions.garbage_collect(ttl);

    Json(GcResponse {
        evicted,
        remaining: state.sessions.len(),
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(
        state.provider.clone(),
        state.sessions.stats(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
