pub mod feed_client;
pub mod feed_source_repository;
pub mod http_feed_client;

pub use feed_client::FeedClient;
pub use feed_source_repository::HardcodedFeedSourceRepository;
pub use http_feed_client::{HttpFeedClient, DEFAULT_USER_AGENT};
