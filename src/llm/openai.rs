use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use super::provider::LlmProvider;
use super::types::{ChatCompletionResponse, ChatRequest};
use crate::qa::GenerationError;

/// Chat-completion client for OpenAI-compatible endpoints (OpenRouter, LM
/// Studio, vLLM, ...).
#[derive(Clone)]
pub struct OpenAiCompatibleProvider {
    base_url: String,
    api_key: String,
    client: Client,
}

impl OpenAiCompatibleProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, api_key, client))
    }

    pub fn with_client(base_url: impl Into<String>, api_key: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        "openai-compatible"
    }

    async fn chat(&self, request: ChatRequest, model_id: &str) -> Result<String, GenerationError> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut body = json!({
            "model": model_id,
            "messages": request.messages,
            "stream": false,
        });

        if let Some(obj) = body.as_object_mut() {
            if let Some(t) = request.max_tokens { obj.insert("max_tokens".to_string(), json!(t)); }
        }

        let res = self.client.post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(GenerationError::Status { status, body: text });
        }

        let bytes = res.bytes().await?;
        parse_completion(&bytes)
    }
}

fn parse_completion(bytes: &[u8]) -> Result<String, GenerationError> {
    let payload: ChatCompletionResponse =
        serde_json::from_slice(bytes).map_err(GenerationError::malformed)?;

    payload
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::Malformed("response contained no choices".to_string()))?
        .message
        .content
        .ok_or_else(|| GenerationError::Malformed("first choice has no text content".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_completion_returns_first_choice_verbatim() {
        let body = br#"{
            "id": "gen-1",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": " Paris " } },
                { "index": 1, "message": { "role": "assistant", "content": "Lyon" } }
            ]
        }"#;
        assert_eq!(parse_completion(body).unwrap(), " Paris ");
    }

    #[test]
    fn parse_completion_rejects_empty_choices() {
        let err = parse_completion(br#"{ "choices": [] }"#).unwrap_err();
        assert!(matches!(err, GenerationError::Malformed(_)));
    }

    #[test]
    fn parse_completion_rejects_null_content() {
        let body = br#"{ "choices": [ { "message": { "role": "assistant", "content": null } } ] }"#;
        assert!(matches!(
            parse_completion(body),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn parse_completion_rejects_non_json() {
        assert!(matches!(
            parse_completion(b"<html>bad gateway</html>"),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let provider =
            OpenAiCompatibleProvider::with_client("https://openrouter.ai/api/v1/", "key", Client::new());
        assert_eq!(provider.base_url, "https://openrouter.ai/api/v1");
    }
}
