//! Message storage.
//!
//! # Collection: `messages`
//!
//! One document per posted message:
//!
//! ```text
//! { _id: ObjectId, name: String, message: String, createdAt: Date }
//! ```
//!
//! The route layer only sees the [`MessageStore`] trait. The server builds one
//! store at startup and hands it to every request through `AppState`.
//!
//! # Indexes
//!
//! A descending index on `createdAt` is created by the CLI:
//! ```bash
//! cargo run -p message-board-cli -- setup
//! ```

pub mod memory;
pub mod messages;

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::ExposeSecret;

use message_board_core::{Message, NewMessage};

use crate::config::{BoardConfig, DEFAULT_DATABASE, DatabaseConfig, StoreKind};

pub use memory::MemoryMessageStore;
pub use messages::MongoMessageStore;

/// Errors from the message store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Error from the MongoDB driver.
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// The store cannot serve requests.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read and write access to posted messages.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// All messages, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    async fn list_all(&self) -> Result<Vec<Message>, StoreError>;

    /// Persist a message stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    async fn create(&self, new: NewMessage) -> Result<Message, StoreError>;

    /// Check that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store does not respond.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Connect to MongoDB and return the configured database.
///
/// The database name comes from `BOARD_DATABASE`, then the connection
/// string, then [`DEFAULT_DATABASE`].
///
/// # Errors
///
/// Returns `StoreError::Database` if the connection string is invalid.
pub async fn connect(config: &DatabaseConfig) -> Result<mongodb::Database, StoreError> {
    let client = mongodb::Client::with_uri_str(config.uri.expose_secret()).await?;

    let database = match &config.database {
        Some(name) => client.database(name),
        None => client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
    };

    Ok(database)
}

/// Build the message store selected by configuration.
///
/// # Errors
///
/// Returns `StoreError` if the MongoDB client cannot be created.
pub async fn create_store(config: &BoardConfig) -> Result<Arc<dyn MessageStore>, StoreError> {
    match (config.store, &config.database) {
        (StoreKind::Memory, _) => Ok(Arc::new(MemoryMessageStore::new())),
        (StoreKind::Mongo, Some(database)) => {
            let database = connect(database).await?;
            Ok(Arc::new(MongoMessageStore::new(&database)))
        }
        (StoreKind::Mongo, None) => Err(StoreError::Unavailable(
            "mongo store selected without database configuration".to_string(),
        )),
    }
}
