//! Message listing and posting.

use message_board_core::NewMessage;
use message_board_web::config::BoardConfig;
use message_board_web::db::MessageStore;

use super::{CommandError, connect};

/// Print every message, newest first.
pub async fn list(config: &BoardConfig) -> Result<(), CommandError> {
    let store = connect(config).await?;
    let messages = store.list_all().await?;

    tracing::info!(count = messages.len(), "Loaded messages");

    #[allow(clippy::print_stdout)]
    {
        for message in &messages {
            println!(
                "{}  {}: {}",
                message.created_at.format("%Y-%m-%d %H:%M:%S"),
                message.name,
                message.message
            );
        }
    }

    Ok(())
}

/// Store one message.
pub async fn post(
    config: &BoardConfig,
    name: String,
    message: String,
) -> Result<(), CommandError> {
    let store = connect(config).await?;
    let created = store.create(NewMessage::new(name, message)).await?;

    tracing::info!(created_at = %created.created_at, "Message posted");
    Ok(())
}
