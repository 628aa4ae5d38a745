use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::core::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AskParams {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

pub async fn ask(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AskParams>,
) -> Result<Json<AskResponse>, ApiError> {
    if params.question.trim().is_empty() {
        return Err(ApiError::BadRequest("question must not be empty".to_string()));
    }

    let corpus = state.corpus.load_corpus().await?;
    let answer = state.engine.answer(&params.question, &corpus).await?;

    tracing::info!(
        messages = corpus.len(),
        answer_chars = answer.len(),
        "Answered question"
    );
    Ok(Json(AskResponse { answer }))
}
