use crate::domain::feed::{FeedSource, FeedSourceRepository};
use std::collections::HashSet;
use std::sync::LazyLock;

static FEED_SOURCES: LazyLock<Vec<FeedSource>> = LazyLock::new(|| {
    vec![
        FeedSource {
            id: "sebastianraschka".to_string(),
            title: "Sebastian Raschka".to_string(),
            url: "https://sebastianraschka.com/rss_feed.xml".to_string(),
        },
        FeedSource {
            id: "andrejkarpathy".to_string(),
            title: "Andrej Karpathy".to_string(),
            url: "https://karpathy.bearblog.dev/feed/?type=rss".to_string(),
        },
        FeedSource {
            id: "philschmid".to_string(),
            title: "Phil Schmid".to_string(),
            url: "https://www.philschmid.de/rss".to_string(),
        },
        FeedSource {
            id: "huyenchip".to_string(),
            title: "Chip Huyen".to_string(),
            url: "https://huyenchip.com/feed.xml".to_string(),
        },
        FeedSource {
            id: "mlmastery".to_string(),
            title: "Jason Brownlee".to_string(),
            url: "https://machinelearningmastery.com/feed/".to_string(),
        },
        FeedSource {
            id: "eugeneyan".to_string(),
            title: "Eugene Yan".to_string(),
            url: "https://eugeneyan.com/rss/".to_string(),
        },
        FeedSource {
            id: "hamelhussain".to_string(),
            title: "Hamel Hussain".to_string(),
            url: "https://medium.com/feed/@hamelhusain".to_string(),
        },
    ]
});

/// Registry backed by a compiled-in table, or by an explicit list in tests
pub struct HardcodedFeedSourceRepository {
    sources: Vec<FeedSource>,
}

impl HardcodedFeedSourceRepository {
    pub fn new() -> Self {
        Self::with_sources(FEED_SOURCES.clone())
    }

    pub fn with_sources(sources: Vec<FeedSource>) -> Self {
        let mut seen_ids: HashSet<&String> = HashSet::new();
        for source in &sources {
            debug_assert!(
                seen_ids.insert(&source.id),
                "Duplicate feed source id {}",
                source.id
            );
            debug_assert!(
                source.url.starts_with("http://") || source.url.starts_with("https://"),
                "Feed source {} must have an absolute http(s) URL",
                source.id
            );
        }

        Self { sources }
    }
}

impl FeedSourceRepository for HardcodedFeedSourceRepository {
    fn all_sources(&self) -> Vec<FeedSource> {
        self.sources.clone()
    }

    fn find_sources(&self, ids: &[String]) -> Vec<FeedSource> {
        for id in ids {
            if !self.sources.iter().any(|s| &s.id == id) {
                tracing::warn!(source_id = %id, "Unknown feed source requested");
            }
        }

        self.sources
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect()
    }
}

impl Default for HardcodedFeedSourceRepository {
    fn default() -> Self {
        Self::new()
    }
}
