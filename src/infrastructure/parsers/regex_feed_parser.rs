use crate::domain::feed::parser::{clean_description, decode_title_entities, FeedParser};
use crate::domain::feed::{FeedItem, FeedParseError, FeedSource};
use regex::Regex;

/// Pattern-based extraction of `<item>` blocks.
///
/// Each field is matched independently inside its item block, so irregular
/// markup degrades to fewer items instead of failing. Attribute-qualified or
/// self-closing tags are not recognized.
pub struct RegexFeedParser {
    item_pattern: Regex,
    title_pattern: Regex,
    link_pattern: Regex,
    pub_date_pattern: Regex,
    description_pattern: Regex,
}

impl RegexFeedParser {
    pub fn new() -> Self {
        Self {
            item_pattern: Regex::new(r"(?s)<item>(.*?)</item>").unwrap(),
            title_pattern: Regex::new(r"<title>([^<]+)</title>").unwrap(),
            link_pattern: Regex::new(r"<link>([^<]+)</link>").unwrap(),
            pub_date_pattern: Regex::new(r"<pubDate>([^<]+)</pubDate>").unwrap(),
            description_pattern: Regex::new(
                r"<description>(?:<!\[CDATA\[(?s:(.*?))\]\]>|([^<]+))</description>",
            )
            .unwrap(),
        }
    }

    fn capture<'a>(pattern: &Regex, block: &'a str) -> Option<&'a str> {
        pattern
            .captures(block)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    fn description(&self, block: &str) -> String {
        self.description_pattern
            .captures(block)
            .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| clean_description(m.as_str()))
            .unwrap_or_default()
    }

    fn parse_item(&self, block: &str, source: &FeedSource) -> Option<FeedItem> {
        let title = Self::capture(&self.title_pattern, block)?;
        let link = Self::capture(&self.link_pattern, block)?;
        let pub_date = Self::capture(&self.pub_date_pattern, block)?;

        Some(FeedItem::new(
            source,
            decode_title_entities(title),
            link.to_string(),
            pub_date.to_string(),
            self.description(block),
        ))
    }
}

impl Default for RegexFeedParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedParser for RegexFeedParser {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn parse(&self, raw: &str, source: &FeedSource) -> Result<Vec<FeedItem>, FeedParseError> {
        Ok(self
            .item_pattern
            .captures_iter(raw)
            .filter_map(|caps| caps.get(1))
            .filter_map(|block| self.parse_item(block.as_str(), source))
            .collect())
    }
}
