use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    domain::feed::{FeedItem, FeedService, FeedServiceApi, FeedSource},
    error::{AppError, AppResult},
};

#[derive(Debug, Deserialize)]
pub struct AggregateFeedQuery {
    /// Comma-separated registry ids
    #[serde(default)]
    pub sources: Option<String>,
}

impl AggregateFeedQuery {
    /// Requested ids, or `None` when every source should be fetched
    pub fn source_ids(&self) -> Option<Vec<String>> {
        let ids: Vec<String> = self
            .sources
            .as_deref()?
            .split(',')
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();

        if ids.is_empty() {
            None
        } else {
            Some(ids)
        }
    }
}

pub struct FeedController {
    feed_service: Arc<FeedService>,
}

impl FeedController {
    pub fn new(feed_service: Arc<FeedService>) -> Self {
        Self { feed_service }
    }

    /// GET /api/rss-feed - Items from the past year across all sources, newest first
    pub async fn get_feed(
        State(controller): State<Arc<FeedController>>,
        Query(query): Query<AggregateFeedQuery>,
    ) -> AppResult<Json<Vec<FeedItem>>> {
        let items = controller
            .feed_service
            .aggregate(query.source_ids())
            .await?;
        Ok(Json(items))
    }

    /// GET /api/rss-feed/sources - Registered feed sources
    pub async fn list_sources(
        State(controller): State<Arc<FeedController>>,
    ) -> Json<Vec<FeedSource>> {
        Json(controller.feed_service.sources())
    }

    /// Any non-GET method on the feed routes, HEAD included
    pub async fn method_not_allowed() -> AppError {
        AppError::MethodNotAllowed
    }
}
