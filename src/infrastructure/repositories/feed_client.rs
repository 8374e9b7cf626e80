use crate::domain::feed::{FeedFetchError, FeedSource};
use async_trait::async_trait;

/// Retrieves the raw markup published by a feed source.
///
/// Implementations return the body only for a 2xx response; any other status,
/// transport error or timeout is a [`FeedFetchError`].
#[async_trait]
pub trait FeedClient: Send + Sync {
    async fn fetch(&self, source: &FeedSource) -> Result<String, FeedFetchError>;
}
