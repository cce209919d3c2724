//! HTTP route handlers for the message board.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Message list (newest first) with the posting form
//! POST /post              - Create a message, redirect to /
//!
//! # Bundled asset
//! GET  /wizfile           - Asset text wrapped in <pre>
//! GET  /wizexercise.txt   - Asset bytes as text/plain
//!
//! # Health
//! GET  /health            - Liveness
//! GET  /health/ready      - Readiness (pings the message store)
//! ```

pub mod assets;
pub mod health;
pub mod home;
pub mod messages;

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the health check routes router.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::health))
        .route("/ready", get(health::readiness))
}

/// Create all routes for the message board.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Message list
        .route("/", get(home::home))
        // Form submission
        .route("/post", post(messages::create))
        // Bundled asset
        .route("/wizfile", get(assets::wizfile))
        .route("/wizexercise.txt", get(assets::raw))
        // Health checks
        .nest("/health", health_routes())
        .fallback(not_found)
}

/// Respond to unknown paths.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
