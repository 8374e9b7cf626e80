pub mod error;
pub mod model;
pub mod parser;
pub mod recency;
pub mod service;

pub use error::{FeedFetchError, FeedParseError, FeedServiceError};
pub use model::{FeedItem, FeedSource};
pub use parser::FeedParser;
pub use service::{FeedService, FeedServiceApi};

/// Read-only access to the configured feed endpoints
pub trait FeedSourceRepository: Send + Sync {
    fn all_sources(&self) -> Vec<FeedSource>;
    fn find_sources(&self, ids: &[String]) -> Vec<FeedSource>;
}
