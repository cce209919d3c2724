//! Message board entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A posted message (domain type).
///
/// Messages are created from form submissions and are never updated or
/// deleted. All three fields are always present on a persisted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Author name as submitted.
    pub name: String,
    /// Message body as submitted.
    pub message: String,
    /// When the message was stored. Assigned by the server.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a message.
///
/// Values are stored verbatim; empty strings are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    pub name: String,
    pub message: String,
}

impl NewMessage {
    /// Create a new message input.
    #[must_use]
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Stamp this input with a creation time, producing a [`Message`].
    #[must_use]
    pub fn into_message(self, created_at: DateTime<Utc>) -> Message {
        Message {
            name: self.name,
            message: self.message,
            created_at,
        }
    }
}
