//! API Module
//!
//! HTTP handlers and routing for the session store REST API.
//!
//! # Endpoints
//! - `POST|GET|DELETE /sessions/:id` - Create, describe, destroy a session
//! - `PUT|GET|DELETE /sessions/:id/values/:key` - Session values
//! - `POST /gc` - Run a garbage collection sweep
//! - `GET /stats` - Get store statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
