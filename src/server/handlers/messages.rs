use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::core::errors::ApiError;
use crate::state::AppState;

/// Rebuild the corpus snapshot from upstream.
pub async fn refresh_messages(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let corpus = state.corpus.refresh().await?;
    Ok(Json(json!({ "messages": corpus.len() })))
}
