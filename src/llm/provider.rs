use async_trait::async_trait;

use super::types::ChatRequest;
use crate::qa::GenerationError;

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// return the provider name (e.g. "openrouter")
    fn name(&self) -> &str;

    /// chat completion (non-streaming), returning the first choice's text
    async fn chat(&self, request: ChatRequest, model_id: &str) -> Result<String, GenerationError>;
}
