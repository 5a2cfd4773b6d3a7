//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::handlers::{get_handler, health_handler, set_handler, AppState};
use crate::config::Config;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /set` - Store a value
/// - `GET /get` - Read and remove a value
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Timeout: Aborts requests that exceed `request_timeout` with 408
/// - Body limit: Rejects bodies over `max_body_bytes` with 413
/// - Tracing: Logs all requests
pub fn create_router(state: AppState, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", post(set_handler))
        .route("/get", get(get_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
