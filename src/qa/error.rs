use reqwest::StatusCode;
use thiserror::Error;

/// Failure of the language-model call behind an answer.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("model request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed model response: {0}")]
    Malformed(String),
}

impl GenerationError {
    pub fn malformed<E: std::fmt::Display>(err: E) -> Self {
        GenerationError::Malformed(err.to_string())
    }
}
