use crate::domain::feed::parser::{clean_description, FeedParser};
use crate::domain::feed::{FeedItem, FeedParseError, FeedSource};

/// Structured RSS 2.0 parsing through the `rss` crate.
///
/// Stricter than [`super::RegexFeedParser`]: a document that is not well-formed
/// XML is rejected as a whole. Entities in titles are resolved by the XML
/// reader.
#[derive(Debug, Default)]
pub struct RssFeedParser;

impl RssFeedParser {
    pub fn new() -> Self {
        Self
    }
}

impl FeedParser for RssFeedParser {
    fn name(&self) -> &'static str {
        "rss"
    }

    fn parse(&self, raw: &str, source: &FeedSource) -> Result<Vec<FeedItem>, FeedParseError> {
        let channel = rss::Channel::read_from(raw.as_bytes())?;

        let items = channel
            .items()
            .iter()
            .filter_map(|item| {
                Some(FeedItem::new(
                    source,
                    item.title()?.to_string(),
                    item.link()?.to_string(),
                    item.pub_date()?.to_string(),
                    item.description().map(clean_description).unwrap_or_default(),
                ))
            })
            .collect();

        Ok(items)
    }
}
