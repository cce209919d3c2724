//! Message Board - public message board server.
//!
//! This binary serves the board on port 3000 by default.
//!
//! # Architecture
//!
//! - Axum web framework, plain HTML forms
//! - Askama templates for server-side rendering
//! - MongoDB `messages` collection, reached through one client built at startup
//!
//! # Routes
//!
//! See [`message_board_web::routes`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use message_board_web::config::BoardConfig;
use message_board_web::state::AppState;
use message_board_web::{db, telemetry};

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = BoardConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let sentry_guard = telemetry::init_sentry(&config);

    telemetry::init_tracing(&config);
    if sentry_guard.is_some() {
        tracing::info!("Sentry initialized");
    }

    // One store for the whole process, shared through AppState
    let store = db::create_store(&config)
        .await
        .expect("Failed to create message store");
    tracing::info!(store = ?config.store, "Message store created");

    // The driver connects lazily; report an unreachable database early
    if let Err(e) = store.ping().await {
        tracing::warn!(error = %e, "Message store is not reachable yet");
    }

    let state = AppState::from_config(&config, store);

    let app = message_board_web::app(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    tracing::info!("message board listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    drop(sentry_guard);
}

/// Resolve on Ctrl+C or SIGTERM (sent by the container runtime on stop).
///
/// In-flight posts finish their insert before the listener closes.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Stopping message board, draining open requests");
}
