use super::error::FeedServiceError;
use super::parser::FeedParser;
use super::recency::retain_recent;
use super::{FeedItem, FeedSource, FeedSourceRepository};
use crate::infrastructure::repositories::FeedClient;
use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;

pub struct FeedService {
    source_repo: Arc<dyn FeedSourceRepository>,
    client: Arc<dyn FeedClient>,
    parser: Arc<dyn FeedParser>,
}

impl FeedService {
    pub fn new(
        source_repo: Arc<dyn FeedSourceRepository>,
        client: Arc<dyn FeedClient>,
        parser: Arc<dyn FeedParser>,
    ) -> Self {
        Self {
            source_repo,
            client,
            parser,
        }
    }
}

#[async_trait]
pub trait FeedServiceApi: Send + Sync {
    /// Fetch every selected source concurrently and return the merged items
    /// from the past year, newest first.
    ///
    /// `source_ids` narrows the fan-out to those registry ids; `None` means
    /// every registered source. A source that fails to fetch or parse only
    /// contributes zero items, even if its task panics. The call fails only
    /// when a task is cancelled out from under the request.
    async fn aggregate(
        &self,
        source_ids: Option<Vec<String>>,
    ) -> Result<Vec<FeedItem>, FeedServiceError>;

    fn sources(&self) -> Vec<FeedSource>;
}

#[async_trait]
impl FeedServiceApi for FeedService {
    async fn aggregate(
        &self,
        source_ids: Option<Vec<String>>,
    ) -> Result<Vec<FeedItem>, FeedServiceError> {
        let sources = match source_ids {
            Some(ids) => self.source_repo.find_sources(&ids),
            None => self.source_repo.all_sources(),
        };

        tracing::info!(
            source_count = sources.len(),
            parser = self.parser.name(),
            "Aggregating feeds"
        );

        let titles: Vec<String> = sources.iter().map(|s| s.title.clone()).collect();
        let handles: Vec<_> = sources
            .into_iter()
            .map(|source| {
                let client = self.client.clone();
                let parser = self.parser.clone();
                tokio::spawn(async move {
                    collect_source(client.as_ref(), parser.as_ref(), &source).await
                })
            })
            .collect();

        let mut items = Vec::new();
        for (title, result) in titles.iter().zip(join_all(handles).await) {
            match result {
                Ok(source_items) => items.extend(source_items),
                // A panic stays inside its source; cancellation aborts the request
                Err(err) if err.is_panic() => {
                    tracing::error!(source = %title, error = %err, "Feed task panicked");
                }
                Err(err) => return Err(err.into()),
            }
        }

        let fetched = items.len();
        let recent = retain_recent(items, Utc::now());

        tracing::info!(
            fetched = fetched,
            returned = recent.len(),
            "Feed aggregation finished"
        );

        Ok(recent)
    }

    fn sources(&self) -> Vec<FeedSource> {
        self.source_repo.all_sources()
    }
}

/// Fetch and parse one source. Every failure is logged and becomes an empty
/// list so siblings are unaffected.
async fn collect_source(
    client: &dyn FeedClient,
    parser: &dyn FeedParser,
    source: &FeedSource,
) -> Vec<FeedItem> {
    let raw = match client.fetch(source).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(
                source = %source.title,
                url = %source.url,
                error = %e,
                "Failed to fetch feed"
            );
            return Vec::new();
        }
    };

    match parser.parse(&raw, source) {
        Ok(items) => {
            tracing::debug!(
                source = %source.title,
                items = items.len(),
                "Parsed feed"
            );
            items
        }
        Err(e) => {
            tracing::error!(
                source = %source.title,
                url = %source.url,
                error = %e,
                "Failed to parse feed"
            );
            Vec::new()
        }
    }
}
