use super::feed_client::FeedClient;
use crate::domain::feed::{FeedFetchError, FeedSource};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; RSS Reader; +https://example.com)";

/// reqwest-backed feed client with a fixed user agent and a per-request timeout
pub struct HttpFeedClient {
    http_client: reqwest::Client,
    user_agent: String,
    timeout: Duration,
}

impl HttpFeedClient {
    pub fn new(user_agent: String, timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            user_agent,
            timeout,
        }
    }

    async fn get_body(&self, url: &str) -> Result<String, FeedFetchError> {
        let response = self
            .http_client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedFetchError::HttpStatus(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl FeedClient for HttpFeedClient {
    async fn fetch(&self, source: &FeedSource) -> Result<String, FeedFetchError> {
        tracing::debug!(
            source = %source.title,
            url = %source.url,
            "Fetching feed"
        );

        // Covers connect, headers and body so a trickling server can't stall the join
        let body = tokio::time::timeout(self.timeout, self.get_body(&source.url))
            .await
            .map_err(|_| FeedFetchError::Timeout)??;

        tracing::debug!(
            source = %source.title,
            bytes = body.len(),
            "Fetched feed"
        );

        Ok(body)
    }
}
