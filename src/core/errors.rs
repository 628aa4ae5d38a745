use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

use crate::messages::RetrievalError;
use crate::qa::GenerationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("Error fetching messages: {0}")]
    Retrieval(#[from] RetrievalError),
    #[error("Error generating answer: {0}")]
    Generation(#[from] GenerationError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        ApiError::Internal(err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Retrieval(_) | ApiError::Generation(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match &self {
            ApiError::BadRequest(msg) => msg.clone(),
            other => other.to_string(),
        };

        if status.is_server_error() {
            tracing::error!("{}", message);
        }

        let body = Json(json!({ "detail": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode as UpstreamStatus;

    #[test]
    fn upstream_failures_map_to_server_error_with_cause() {
        let err = ApiError::from(RetrievalError::Status {
            status: UpstreamStatus::INTERNAL_SERVER_ERROR,
            body: "database offline".to_string(),
        });

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let message = err.to_string();
        assert!(message.starts_with("Error fetching messages:"));
        assert!(message.contains("database offline"));
    }

    #[test]
    fn generation_failures_map_to_server_error() {
        let err = ApiError::from(GenerationError::Malformed("no choices".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("no choices"));
    }

    #[test]
    fn bad_request_keeps_plain_message() {
        let response = ApiError::BadRequest("question must not be empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
