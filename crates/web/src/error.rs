//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. Route handlers that can fail return
//! `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::StoreError;

/// Body returned for every server-side failure.
pub const SERVER_ERROR_BODY: &str = "Error occurred";

/// Body returned for unknown routes.
pub const NOT_FOUND_BODY: &str = "Not found";

/// Application-level error type for the message board.
#[derive(Debug, Error)]
pub enum AppError {
    /// Message store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The bundled text asset could not be read.
    #[error("Asset error: {0}")]
    Asset(#[from] std::io::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Store(_) | Self::Asset(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Store(_) | Self::Asset(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Store(_) | Self::Asset(_) => SERVER_ERROR_BODY,
            Self::NotFound(_) => NOT_FOUND_BODY,
        };

        (self.status(), message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
