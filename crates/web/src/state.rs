//! Application state shared across handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::BoardConfig;
use crate::db::MessageStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the message store and the bundled asset location.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn MessageStore>,
    asset_path: PathBuf,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `store` - Message store built at startup
    /// * `asset_path` - Text asset served by `/wizfile` and `/wizexercise.txt`
    pub fn new(store: Arc<dyn MessageStore>, asset_path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                asset_path: asset_path.into(),
            }),
        }
    }

    /// Create application state from loaded configuration.
    pub fn from_config(config: &BoardConfig, store: Arc<dyn MessageStore>) -> Self {
        Self::new(store, config.asset_path.clone())
    }

    /// Get a reference to the message store.
    #[must_use]
    pub fn store(&self) -> &dyn MessageStore {
        self.inner.store.as_ref()
    }

    /// Path of the bundled text asset.
    #[must_use]
    pub fn asset_path(&self) -> &Path {
        &self.inner.asset_path
    }
}
