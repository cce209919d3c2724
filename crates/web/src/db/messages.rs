//! MongoDB-backed message store.

use async_trait::async_trait;
use bson::doc;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};

use message_board_core::{Message, NewMessage};

use super::{MessageStore, StoreError};

/// Name of the collection holding messages.
pub const COLLECTION: &str = "messages";

/// A message as stored in MongoDB.
///
/// Extra fields written by other clients (such as a `__v` version key) are
/// ignored when reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub message: String,
    #[serde(
        rename = "createdAt",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub created_at: DateTime<Utc>,
}

impl From<MessageDocument> for Message {
    fn from(doc: MessageDocument) -> Self {
        Self {
            name: doc.name,
            message: doc.message,
            created_at: doc.created_at,
        }
    }
}

impl From<&Message> for MessageDocument {
    fn from(message: &Message) -> Self {
        Self {
            id: None,
            name: message.name.clone(),
            message: message.message.clone(),
            created_at: message.created_at,
        }
    }
}

/// Query options for [`MessageStore::list_all`]: newest `createdAt` first.
fn list_options() -> FindOptions {
    FindOptions::builder()
        .sort(doc! { "createdAt": -1 })
        .build()
}

/// Message store over a MongoDB collection.
#[derive(Clone)]
pub struct MongoMessageStore {
    database: Database,
    collection: Collection<MessageDocument>,
}

impl MongoMessageStore {
    /// Create a store over the `messages` collection of `database`.
    #[must_use]
    pub fn new(database: &Database) -> Self {
        Self {
            database: database.clone(),
            collection: database.collection(COLLECTION),
        }
    }

    /// Create the descending `createdAt` index used by [`MessageStore::list_all`].
    ///
    /// Safe to run repeatedly; MongoDB ignores an identical existing index.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if index creation fails.
    pub async fn setup_collection(&self) -> Result<(), StoreError> {
        self.collection
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "createdAt": -1 })
                    .options(Some(
                        IndexOptions::builder()
                            .name(Some("createdAt_desc".to_string()))
                            .build(),
                    ))
                    .build(),
                None,
            )
            .await?;

        Ok(())
    }
}

#[async_trait]
impl MessageStore for MongoMessageStore {
    async fn list_all(&self) -> Result<Vec<Message>, StoreError> {
        let documents: Vec<MessageDocument> = self
            .collection
            .find(None, list_options())
            .await?
            .try_collect()
            .await?;

        Ok(documents.into_iter().map(Message::from).collect())
    }

    async fn create(&self, new: NewMessage) -> Result<Message, StoreError> {
        // BSON dates carry millisecond precision; stamp with the same so the
        // returned value matches what a later read yields.
        let message = new.into_message(bson::DateTime::now().to_chrono());

        self.collection
            .insert_one(MessageDocument::from(&message), None)
            .await?;

        Ok(message)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_document_field_names() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let message = NewMessage::new("Bob", "test").into_message(at);

        let document = bson::to_document(&MessageDocument::from(&message)).unwrap();

        assert_eq!(document.get_str("name").unwrap(), "Bob");
        assert_eq!(document.get_str("message").unwrap(), "test");
        assert_eq!(
            document.get_datetime("createdAt").unwrap().to_chrono(),
            at
        );
        // _id is left for the server to assign
        assert!(!document.contains_key("_id"));
    }

    #[test]
    fn test_list_sorts_newest_first_on_stored_field() {
        let sort = list_options().sort.unwrap();
        assert_eq!(sort, doc! { "createdAt": -1 });

        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let message = NewMessage::new("Bob", "test").into_message(at);
        let document = bson::to_document(&MessageDocument::from(&message)).unwrap();
        for key in sort.keys() {
            assert!(document.contains_key(key), "sort key {key} is not stored");
        }
    }

    #[test]
    fn test_document_ignores_version_key() {
        let at = bson::DateTime::from_millis(1_700_000_000_000);
        let raw = doc! {
            "_id": ObjectId::new(),
            "name": "Alice",
            "message": "hello",
            "createdAt": at,
            "__v": 0,
        };

        let document: MessageDocument = bson::from_document(raw).unwrap();
        let message = Message::from(document);

        assert_eq!(message.name, "Alice");
        assert_eq!(message.message, "hello");
        assert_eq!(message.created_at, at.to_chrono());
    }

    #[test]
    fn test_document_without_created_at_is_rejected() {
        let raw = doc! { "name": "Alice", "message": "hello" };
        assert!(bson::from_document::<MessageDocument>(raw).is_err());
    }
}
