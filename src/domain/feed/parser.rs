use super::error::FeedParseError;
use super::model::{FeedItem, FeedSource};
use regex::Regex;
use std::sync::LazyLock;

/// Descriptions are cut to this many characters after tag stripping
pub const MAX_DESCRIPTION_CHARS: usize = 200;

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Turns one raw feed document into items attributed to `source`.
///
/// Implementations must keep items in document order and must drop any item
/// missing a title, link or publication date rather than emitting a partial
/// record. Markup that is merely truncated or irregular should yield fewer
/// items, not an error.
pub trait FeedParser: Send + Sync {
    fn name(&self) -> &'static str;

    fn parse(&self, raw: &str, source: &FeedSource) -> Result<Vec<FeedItem>, FeedParseError>;
}

/// Decode `&quot;`, `&amp;`, `&lt;` and `&gt;`, one pass each, in that order.
/// No other entity is touched.
pub fn decode_title_entities(title: &str) -> String {
    title
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}

/// Remove anything that looks like a markup tag
pub fn strip_tags(text: &str) -> String {
    TAG_PATTERN.replace_all(text, "").into_owned()
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Plain-text description: tags stripped, then capped at 200 characters
pub fn clean_description(raw: &str) -> String {
    truncate_chars(&strip_tags(raw), MAX_DESCRIPTION_CHARS)
}
