//! Collection setup.

use message_board_web::config::BoardConfig;
use message_board_web::db::MessageStore;

use super::{CommandError, connect};

/// Create the `createdAt` index and confirm the database answers.
pub async fn run(config: &BoardConfig) -> Result<(), CommandError> {
    let store = connect(config).await?;

    store.ping().await?;
    tracing::info!("Creating messages indexes...");
    store.setup_collection().await?;

    tracing::info!("Message collection setup complete!");
    Ok(())
}
