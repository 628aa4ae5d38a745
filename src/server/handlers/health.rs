use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Service status. Reads the snapshot from disk only; never contacts upstream.
pub async fn get_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cache = state.corpus.snapshot_status();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "started_at": state.started_at.to_rfc3339(),
        "model": state.engine.model(),
        "cache": cache,
    }))
}
