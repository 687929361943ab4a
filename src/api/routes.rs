//! API Routes
//!
//! Configures the Axum router with all session store endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_session_handler, delete_value_handler, destroy_session_handler, gc_handler,
    get_session_handler, get_value_handler, health_handler, set_value_handler, stats_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /sessions/:id` - Create a session
/// - `GET /sessions/:id` - Describe a live session
/// - `DELETE /sessions/:id` - Destroy a session
/// - `PUT /sessions/:id/values/:key` - Store a value
/// - `GET /sessions/:id/values/:key` - Read a value
/// - `DELETE /sessions/:id/values/:key` - Delete a value
/// - `POST /gc` - Run a garbage collection sweep
/// - `GET /stats` - Get store statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/sessions/:id",
            post(create_session_handler)
                .get(get_session_handler)
                .delete(destroy_session_handler),
        )
        .route(
            "/sessions/:id/values/:key",
            get(get_value_handler)
                .put(set_value_handler)
                .delete(delete_value_handler),
        )
        .route("/gc", post(gc_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
