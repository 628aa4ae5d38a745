//! Context-constrained answering.
//!
//! One question, one model call. The whole corpus goes into the prompt; an
//! empty corpus answers with the sentinel without reaching the model.

use std::sync::Arc;

use super::error::GenerationError;
use super::prompt::{system_message, user_message, SENTINEL_ANSWER};
use crate::context::format_context;
use crate::llm::{ChatRequest, LlmProvider};
use crate::messages::Message;

pub const DEFAULT_MAX_TOKENS: u32 = 300;

pub struct AnswerEngine {
    provider: Arc<dyn LlmProvider>,
    model: String,
    max_tokens: u32,
}

impl AnswerEngine {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            provider,
            model: model.into(),
            max_tokens,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn answer(&self, question: &str, corpus: &[Message]) -> Result<String, GenerationError> {
        if corpus.is_empty() {
            tracing::info!("Corpus is empty; answering with sentinel");
            return Ok(SENTINEL_ANSWER.to_string());
        }

        let context = format_context(corpus);
        let request = ChatRequest::new(vec![system_message(), user_message(&context, question)])
            .with_max_tokens(self.max_tokens);

        tracing::debug!(
            provider = self.provider.name(),
            model = %self.model,
            messages = corpus.len(),
            context_chars = context.len(),
            "Requesting answer from model"
        );

        let raw = self.provider.chat(request, &self.model).await.map_err(|err| {
            tracing::warn!(model = %self.model, "Model call failed: {}", err);
            err
        })?;

        Ok(raw.trim().to_string())
    }
}
