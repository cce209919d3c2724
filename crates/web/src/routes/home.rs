//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use message_board_core::Message;

use crate::error::Result;
use crate::state::AppState;

/// Display format for message timestamps.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Message display data for templates.
#[derive(Debug, Clone)]
pub struct MessageView {
    pub name: String,
    pub message: String,
    /// Human-readable timestamp.
    pub posted_at: String,
    /// RFC 3339 timestamp for the `<time datetime>` attribute.
    pub posted_at_iso: String,
}

impl From<Message> for MessageView {
    fn from(message: Message) -> Self {
        Self {
            posted_at: message.created_at.format(TIMESTAMP_FORMAT).to_string(),
            posted_at_iso: message.created_at.to_rfc3339(),
            name: message.name,
            message: message.message,
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Messages in display order (newest first).
    pub messages: Vec<MessageView>,
}

impl HomeTemplate {
    /// Build the page from messages already in display order.
    #[must_use]
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages: messages.into_iter().map(MessageView::from).collect(),
        }
    }
}

/// Display every message, newest first.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<HomeTemplate> {
    let messages = state.store().list_all().await?;
    tracing::debug!(count = messages.len(), "Loaded messages");
    Ok(HomeTemplate::new(messages))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use message_board_core::NewMessage;

    use super::*;

    #[test]
    fn test_message_view_formats_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let view = MessageView::from(NewMessage::new("Alice", "hi").into_message(at));

        assert_eq!(view.posted_at, "2024-03-09 14:05:07 UTC");
        assert_eq!(view.posted_at_iso, "2024-03-09T14:05:07+00:00");
    }

    #[test]
    fn test_render_keeps_order_and_escapes() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let page = HomeTemplate::new(vec![
            NewMessage::new("Newer", "<b>bold</b>").into_message(at),
            NewMessage::new("Older", "plain").into_message(at),
        ]);

        let html = page.render().unwrap();

        let newer = html.find("Newer").unwrap();
        let older = html.find("Older").unwrap();
        assert!(newer < older);
        assert!(html.contains("&#60;b&#62;bold&#60;/b&#62;"));
        assert!(!html.contains("<b>bold</b>"));
    }

    #[test]
    fn test_render_empty_board() {
        let html = HomeTemplate::new(Vec::new()).render().unwrap();
        assert!(html.contains("No messages yet."));
        assert!(html.contains(r#"action="/post""#));
    }
}
