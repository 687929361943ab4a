//! Request and Response models for the session store API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{validate_key, validate_session_id, GcRequest, SetValueRequest};
pub use responses::{
    GcResponse, HealthResponse, MessageResponse, SessionResponse, StatsResponse, ValueResponse,
};
