use thiserror::Error;

use crate::core::config::ConfigError;

#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client for {target}: {source}")]
    HttpClient {
        target: &'static str,
        #[source]
        source: reqwest::Error,
    },
}
