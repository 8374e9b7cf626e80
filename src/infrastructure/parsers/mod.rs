pub mod regex_feed_parser;
pub mod rss_feed_parser;

pub use regex_feed_parser::RegexFeedParser;
pub use rss_feed_parser::RssFeedParser;

use crate::domain::feed::FeedParser;
use crate::infrastructure::config::FeedParserKind;
use std::sync::Arc;

pub fn feed_parser_for(kind: FeedParserKind) -> Arc<dyn FeedParser> {
    match kind {
        FeedParserKind::Regex => Arc::new(RegexFeedParser::new()),
        FeedParserKind::Rss => Arc::new(RssFeedParser::new()),
    }
}
