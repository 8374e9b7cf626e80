use serde::{Deserialize, Serialize};

/// A configured upstream feed endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedSource {
    pub id: String,
    pub title: String,
    pub url: String,
}

/// One normalized syndicated entry, built fresh per request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    /// Kept in whatever format the source supplied
    pub pub_date: String,
    pub description: String,
    pub source: String,
    pub source_url: String,
}

impl FeedItem {
    pub fn new(
        source: &FeedSource,
        title: String,
        link: String,
        pub_date: String,
        description: String,
    ) -> Self {
        Self {
            title,
            link,
            pub_date,
            description,
            source: source.title.clone(),
            source_url: source.url.clone(),
        }
    }
}
