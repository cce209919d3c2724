//! CLI subcommands.

pub mod messages;
pub mod setup;

use message_board_web::config::{BoardConfig, ConfigError, DatabaseConfig};
use message_board_web::db::{self, MongoMessageStore, StoreError};

/// Errors shared by the CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("BOARD_STORE=memory has no persistent messages to manage")]
    MemoryStore,
}

/// MongoDB settings from `config`, or `MemoryStore` when the board is
/// configured without a database.
pub fn database_config(config: &BoardConfig) -> Result<&DatabaseConfig, CommandError> {
    config.database.as_ref().ok_or(CommandError::MemoryStore)
}

/// Connect to the configured MongoDB message store.
async fn connect(config: &BoardConfig) -> Result<MongoMessageStore, CommandError> {
    let database = database_config(config)?;

    tracing::info!("Connecting to message store...");
    let database = db::connect(database).await?;

    Ok(MongoMessageStore::new(&database))
}
