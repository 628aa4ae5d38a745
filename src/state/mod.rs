use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::config::AppConfig;
use crate::llm::{LlmProvider, OpenAiCompatibleProvider};
use crate::messages::{CorpusCache, HttpMessageSource, MessageSource};
use crate::qa::AnswerEngine;

pub mod error;

use error::InitializationError;

/// Application state shared across all routes.
///
/// Every collaborator is injected, so tests can assemble a state around
/// in-memory message sources and scripted model providers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub corpus: Arc<CorpusCache>,
    pub engine: Arc<AnswerEngine>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Wires the HTTP message source and model provider from `config`.
    pub fn initialize(config: AppConfig) -> Result<Arc<Self>, InitializationError> {
        let source = HttpMessageSource::new(config.upstream_url.clone(), config.fetch_timeout())
            .map_err(|source| InitializationError::HttpClient {
                target: "message API",
                source,
            })?;

        let provider = OpenAiCompatibleProvider::new(
            config.llm_base_url.clone(),
            config.api_key.clone(),
            config.llm_timeout(),
        )
        .map_err(|source| InitializationError::HttpClient {
            target: "language model API",
            source,
        })?;

        Ok(Self::with_components(
            config,
            Arc::new(source),
            Arc::new(provider),
        ))
    }

    pub fn with_components(
        config: AppConfig,
        source: Arc<dyn MessageSource>,
        provider: Arc<dyn LlmProvider>,
    ) -> Arc<Self> {
        let corpus = Arc::new(CorpusCache::new(
            source,
            config.cache_path.clone(),
            config.page_size,
        ));
        let engine = Arc::new(AnswerEngine::new(
            provider,
            config.model.clone(),
            config.max_tokens,
        ));

        Arc::new(AppState {
            config: Arc::new(config),
            corpus,
            engine,
            started_at: Utc::now(),
        })
    }
}
