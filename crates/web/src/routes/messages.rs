//! Message submission handler.

use axum::{
    Form,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use message_board_core::NewMessage;

use crate::error::Result;
use crate::state::AppState;

/// Posting form data.
///
/// Fields are stored verbatim. A missing field is stored as an empty string.
#[derive(Debug, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
}

impl From<PostForm> for NewMessage {
    fn from(form: PostForm) -> Self {
        Self::new(form.name, form.message)
    }
}

/// Store a posted message and send the visitor back to the list.
///
/// POST /post
///
/// Responds with `302 Found` and `Location: /`.
#[instrument(skip(state, form), fields(name_len = form.name.len(), message_len = form.message.len()))]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<PostForm>,
) -> Result<impl IntoResponse> {
    let message = state.store().create(NewMessage::from(form)).await?;

    tracing::info!(created_at = %message.created_at, "Message posted");

    Ok((StatusCode::FOUND, [(header::LOCATION, "/")]))
}
