use crate::error::AppError;

/// Failure fetching a single upstream feed
#[derive(Debug, thiserror::Error)]
pub enum FeedFetchError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    HttpStatus(u16),
    #[error("request timed out")]
    Timeout,
}

/// Failure extracting items from a single feed document
#[derive(Debug, thiserror::Error)]
pub enum FeedParseError {
    #[error("malformed feed markup: {0}")]
    Malformed(String),
}

impl From<rss::Error> for FeedParseError {
    fn from(err: rss::Error) -> Self {
        FeedParseError::Malformed(err.to_string())
    }
}

/// Failure of the aggregation as a whole, not of any one source
#[derive(Debug, thiserror::Error)]
pub enum FeedServiceError {
    #[error("fan-out join failed: {0}")]
    Join(String),
}

impl From<tokio::task::JoinError> for FeedServiceError {
    fn from(err: tokio::task::JoinError) -> Self {
        FeedServiceError::Join(err.to_string())
    }
}

impl From<FeedServiceError> for AppError {
    fn from(err: FeedServiceError) -> Self {
        match err {
            FeedServiceError::Join(msg) => AppError::FeedAggregation(msg),
        }
    }
}
