use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::feed::{FeedService, FeedServiceApi};

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(feed_service): State<Arc<FeedService>>) -> impl IntoResponse {
    let feed_sources = feed_service.sources().len();

    if feed_sources > 0 {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "feed_sources": feed_sources
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "feed_sources": 0
            })),
        )
    }
}
