//! Integration tests for the message board.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p message-board-integration-tests
//! ```
//!
//! The tests drive the real axum router in-process with `tower::ServiceExt`,
//! backed by `MemoryMessageStore` or by [`FailingStore`]. No database or open
//! port is needed.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use tower::ServiceExt;

use message_board_core::{Message, NewMessage};
use message_board_web::config::BoardConfig;
use message_board_web::db::{MemoryMessageStore, MessageStore, StoreError};
use message_board_web::state::AppState;

/// The text asset bundled with the web crate.
pub const ASSET_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../web/assets/wizexercise.txt"
);

/// A store whose every operation fails.
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl MessageStore for FailingStore {
    async fn list_all(&self) -> Result<Vec<Message>, StoreError> {
        Err(StoreError::Unavailable("read failure".to_string()))
    }

    async fn create(&self, _new: NewMessage) -> Result<Message, StoreError> {
        Err(StoreError::Unavailable("write failure".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("no answer".to_string()))
    }
}

/// A collected response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Value of a response header, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Router plus the memory store behind it.
pub struct TestContext {
    pub store: Arc<MemoryMessageStore>,
    pub app: Router,
}

impl TestContext {
    /// Board with no messages.
    #[must_use]
    pub fn new() -> Self {
        Self::with_messages(Vec::new())
    }

    /// Board pre-populated with `messages`.
    #[must_use]
    pub fn with_messages(messages: Vec<Message>) -> Self {
        let store = Arc::new(MemoryMessageStore::with_messages(messages));
        let app = message_board_web::app(AppState::new(store.clone(), ASSET_PATH));
        Self { store, app }
    }

    /// Send a GET request.
    pub async fn get(&self, uri: &str) -> TestResponse {
        send(&self.app, get_request(uri)).await
    }

    /// Send a form-encoded POST request.
    pub async fn post_form(&self, uri: &str, body: &str) -> TestResponse {
        send(&self.app, form_request(uri, body)).await
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Router over a [`FailingStore`].
#[must_use]
pub fn failing_app() -> Router {
    message_board_web::app(AppState::new(Arc::new(FailingStore), ASSET_PATH))
}

/// Router over an empty memory store serving `asset_path`.
#[must_use]
pub fn app_with_asset(asset_path: &str) -> Router {
    message_board_web::app(AppState::new(
        Arc::new(MemoryMessageStore::new()),
        asset_path,
    ))
}

/// Router built the way the binary builds it, from configuration with only
/// `BOARD_STORE=memory` set, so every other setting is at its default.
///
/// # Panics
///
/// Panics if the default configuration fails to load.
#[must_use]
pub fn default_config_app() -> Router {
    let config =
        BoardConfig::from_lookup(|key| (key == "BOARD_STORE").then(|| "memory".to_string()))
            .expect("memory config loads");
    message_board_web::app(AppState::from_config(
        &config,
        Arc::new(MemoryMessageStore::new()),
    ))
}

/// Build a GET request.
///
/// # Panics
///
/// Panics if `uri` is not a valid request URI.
#[must_use]
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid GET request")
}

/// Build a form-encoded POST request.
///
/// # Panics
///
/// Panics if `uri` is not a valid request URI.
#[must_use]
pub fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .expect("valid POST request")
}

/// Run one request through `app` and collect the response.
///
/// # Panics
///
/// Panics if the body cannot be read or is not UTF-8.
pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let body = String::from_utf8(bytes.to_vec()).expect("UTF-8 body");

    TestResponse {
        status,
        headers,
        body,
    }
}
