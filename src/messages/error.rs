use reqwest::StatusCode;
use thiserror::Error;

/// Failure to retrieve the message corpus from the upstream API.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed upstream body: {0}")]
    Malformed(String),
}

impl RetrievalError {
    pub fn malformed<E: std::fmt::Display>(err: E) -> Self {
        RetrievalError::Malformed(err.to_string())
    }
}
