use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::error::RetrievalError;
use super::types::{Message, MessagePage};

/// Source of paginated upstream messages.
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Fetch a single page. An empty page marks the end of the data.
    async fn fetch_page(
        &self,
        offset: usize,
        page_size: usize,
    ) -> Result<Vec<Message>, RetrievalError>;
}

/// `MessageSource` backed by the upstream HTTP messages endpoint.
#[derive(Clone)]
pub struct HttpMessageSource {
    endpoint: String,
    client: Client,
}

impl HttpMessageSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(endpoint, client))
    }

    pub fn with_client(endpoint: impl Into<String>, client: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MessageSource for HttpMessageSource {
    async fn fetch_page(
        &self,
        offset: usize,
        page_size: usize,
    ) -> Result<Vec<Message>, RetrievalError> {
        let res = self
            .client
            .get(&self.endpoint)
            .query(&[("skip", offset), ("limit", page_size)])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(RetrievalError::Status { status, body });
        }

        let bytes = res.bytes().await?;
        let page: MessagePage =
            serde_json::from_slice(&bytes).map_err(RetrievalError::malformed)?;
        let items = page.into_items();

        tracing::debug!(
            offset,
            limit = page_size,
            count = items.len(),
            "Fetched message page"
        );
        Ok(items)
    }
}
