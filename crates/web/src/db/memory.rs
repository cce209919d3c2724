//! In-process message store.
//!
//! Used by tests and by `BOARD_STORE=memory` for running the board without a
//! database. Contents are lost on restart.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use message_board_core::{Message, NewMessage};

use super::{MessageStore, StoreError};

/// Message store holding everything in a `Vec`.
#[derive(Debug, Default)]
pub struct MemoryMessageStore {
    // Kept in insertion order.
    messages: RwLock<Vec<Message>>,
}

impl MemoryMessageStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `messages`.
    #[must_use]
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages: RwLock::new(messages),
        }
    }

    /// Number of stored messages.
    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    /// Whether the store holds no messages.
    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }

    /// Copy of every stored message in insertion order.
    pub async fn snapshot(&self) -> Vec<Message> {
        self.messages.read().await.clone()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn list_all(&self) -> Result<Vec<Message>, StoreError> {
        let mut messages = self.messages.read().await.clone();
        // Reverse first so that equal timestamps list the later insert first;
        // the sort is stable.
        messages.reverse();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(messages)
    }

    async fn create(&self, new: NewMessage) -> Result<Message, StoreError> {
        let message = new.into_message(Utc::now());
        self.messages.write().await.push(message.clone());
        Ok(message)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn message_at(name: &str, minutes: i64) -> Message {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        NewMessage::new(name, format!("from {name}")).into_message(base + Duration::minutes(minutes))
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let store = MemoryMessageStore::with_messages(vec![
            message_at("middle", 5),
            message_at("oldest", 0),
            message_at("newest", 10),
        ]);

        let names: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();

        assert_eq!(names, ["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn test_equal_timestamps_list_later_insert_first() {
        let store = MemoryMessageStore::with_messages(vec![
            message_at("first", 0),
            message_at("second", 0),
        ]);

        let names: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();

        assert_eq!(names, ["second", "first"]);
    }

    #[tokio::test]
    async fn test_create_stores_verbatim() {
        let store = MemoryMessageStore::new();
        assert!(store.is_empty().await);

        let before = Utc::now();
        let created = store.create(NewMessage::new("", "  spaced  ")).await.unwrap();

        assert_eq!(created.name, "");
        assert_eq!(created.message, "  spaced  ");
        assert!(created.created_at >= before);
        assert_eq!(store.len().await, 1);
        assert_eq!(store.snapshot().await, vec![created]);
    }

    #[tokio::test]
    async fn test_ping() {
        assert!(MemoryMessageStore::new().ping().await.is_ok());
    }
}
