//! Bundled text asset, served raw and wrapped in HTML.
//!
//! The file is read on every request so a redeployed asset is picked up
//! without a restart.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, http::header, response::IntoResponse};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Asset page template.
#[derive(Template, WebTemplate)]
#[template(path = "wizfile.html")]
pub struct WizfileTemplate {
    /// Asset text, shown inside `<pre>`.
    pub contents: String,
}

/// Show the asset text in a `<pre>` block.
///
/// GET /wizfile
#[instrument(skip(state))]
pub async fn wizfile(State(state): State<AppState>) -> Result<WizfileTemplate> {
    let contents = tokio::fs::read_to_string(state.asset_path()).await?;
    Ok(WizfileTemplate { contents })
}

/// Serve the asset bytes unchanged.
///
/// GET /wizexercise.txt
#[instrument(skip(state))]
pub async fn raw(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let bytes = tokio::fs::read(state.asset_path()).await?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], bytes))
}
