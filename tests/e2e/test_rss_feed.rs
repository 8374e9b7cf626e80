use crate::e2e::helpers;

use helpers::assertions::{assert_feed_item, assert_newest_first, assert_within_past_year};
use helpers::fixtures::{dated_items, days_ago, rss_document, rss_item};
use helpers::{TestContext, SOURCE_ROUTES, TEST_FETCH_TIMEOUT_SECS};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::time::Duration;
use test_context::test_context;

fn route(id: &str) -> &'static str {
    SOURCE_ROUTES
        .iter()
        .find(|(source_id, _, _)| *source_id == id)
        .map(|(_, _, route)| *route)
        .unwrap()
}

async fn fetch_items(ctx: &TestContext, path: &str) -> Vec<Value> {
    let response = ctx.client.get(path).await.unwrap();
    response.assert_status(StatusCode::OK);
    response.json::<Vec<Value>>().unwrap()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_merge_all_sources_newest_first(ctx: &TestContext) {
    let feeds = ctx.feeds();
    feeds
        .serve_feed(route("alpha"), rss_document(&dated_items("Alpha", 3, 1, 20)))
        .await;
    feeds
        .serve_feed(route("beta"), rss_document(&dated_items("Beta", 2, 5, 30)))
        .await;
    feeds
        .serve_feed(route("gamma"), rss_document(&dated_items("Gamma", 4, 2, 7)))
        .await;

    let items = fetch_items(ctx, "/api/rss-feed").await;

    assert_eq!(items.len(), 9);
    items.iter().for_each(assert_feed_item);
    assert_newest_first(&items);
    assert_eq!(items[0]["title"], "Alpha 1");

    let sources: HashSet<&str> = items.iter().map(|i| i["source"].as_str().unwrap()).collect();
    assert_eq!(sources, HashSet::from(["Alpha Blog", "Beta Notes", "Gamma Weekly"]));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_attribute_items_to_their_source(ctx: &TestContext) {
    ctx.feeds()
        .serve_feed(
            route("beta"),
            rss_document(&[rss_item(
                "Only post",
                "https://beta.example.com/only",
                &days_ago(3),
                "Hi",
            )]),
        )
        .await;

    let items = fetch_items(ctx, "/api/rss-feed").await;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["source"], "Beta Notes");
    assert_eq!(items[0]["sourceUrl"], json!(ctx.source_url("beta")));
    assert_eq!(items[0]["link"], "https://beta.example.com/only");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_ignore_a_failing_source(ctx: &TestContext) {
    let feeds = ctx.feeds();
    feeds
        .serve_feed(route("alpha"), rss_document(&dated_items("Alpha", 3, 1, 10)))
        .await;
    feeds.serve_status(route("beta"), 500).await;
    feeds
        .serve_feed(route("gamma"), rss_document(&dated_items("Gamma", 2, 4, 10)))
        .await;

    let all = fetch_items(ctx, "/api/rss-feed").await;
    let healthy_only = fetch_items(ctx, "/api/rss-feed?sources=alpha,gamma").await;

    assert_eq!(all, healthy_only);
    assert_eq!(all.len(), 5);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_drop_undated_items_and_survive_a_timed_out_source(ctx: &TestContext) {
    let mut alpha_items = dated_items("Alpha", 9, 1, 15);
    alpha_items.insert(
        3,
        rss_item(
            "Alpha undated",
            "https://alpha.example.com/undated",
            "sometime soon",
            "No real date",
        ),
    );
    assert_eq!(alpha_items.len(), 10);

    let feeds = ctx.feeds();
    feeds.serve_feed(route("alpha"), rss_document(&alpha_items)).await;
    feeds
        .serve_slow_feed(
            route("beta"),
            rss_document(&dated_items("Beta", 2, 1, 1)),
            Duration::from_secs(TEST_FETCH_TIMEOUT_SECS + 2),
        )
        .await;

    let items = fetch_items(ctx, "/api/rss-feed?sources=alpha,beta").await;

    assert_eq!(items.len(), 9);
    assert!(items.iter().all(|i| i["source"] == "Alpha Blog"));
    assert_newest_first(&items);
    assert_within_past_year(&items);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_exclude_items_older_than_a_year(ctx: &TestContext) {
    ctx.feeds()
        .serve_feed(
            route("alpha"),
            rss_document(&[
                rss_item("Fresh", "https://alpha.example.com/fresh", &days_ago(10), ""),
                rss_item("Ancient", "https://alpha.example.com/ancient", &days_ago(800), ""),
                rss_item("Just stale", "https://alpha.example.com/stale", &days_ago(367), ""),
            ]),
        )
        .await;

    let items = fetch_items(ctx, "/api/rss-feed").await;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Fresh");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_exclude_items_missing_pub_date(ctx: &TestContext) {
    let body = rss_document(&[
        "<item><title>No date</title><link>https://alpha.example.com/nodate</link></item>"
            .to_string(),
        rss_item("Dated", "https://alpha.example.com/dated", &days_ago(1), ""),
    ]);
    ctx.feeds().serve_feed(route("alpha"), body).await;

    let items = fetch_items(ctx, "/api/rss-feed").await;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Dated");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_normalize_titles_and_descriptions(ctx: &TestContext) {
    let description = format!("<![CDATA[<p>Hello <b>World</b></p>{}]]>", "y".repeat(250));
    ctx.feeds()
        .serve_feed(
            route("gamma"),
            rss_document(&[rss_item(
                "Tom &amp;amp; &quot;Quoted&quot;",
                "https://gamma.example.com/1",
                &days_ago(2),
                &description,
            )]),
        )
        .await;

    let items = fetch_items(ctx, "/api/rss-feed").await;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Tom &amp; \"Quoted\"");

    let description = items[0]["description"].as_str().unwrap();
    assert!(description.starts_with("Hello World"));
    assert_eq!(description.chars().count(), 200);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_empty_list_when_every_source_is_down(ctx: &TestContext) {
    let feeds = ctx.feeds();
    feeds.serve_status(route("alpha"), 502).await;
    feeds.serve_status(route("beta"), 404).await;
    feeds.serve_feed(route("gamma"), "not a feed at all".to_string()).await;

    let items = fetch_items(ctx, "/api/rss-feed").await;
    assert!(items.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fetch_only_requested_sources(ctx: &TestContext) {
    let feeds = ctx.feeds();
    feeds
        .serve_feed(route("alpha"), rss_document(&dated_items("Alpha", 2, 1, 1)))
        .await;
    feeds
        .serve_feed(route("gamma"), rss_document(&dated_items("Gamma", 2, 1, 1)))
        .await;

    let items = fetch_items(ctx, "/api/rss-feed?sources=gamma,unknown").await;

    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i["source"] == "Gamma Weekly"));

    let received = ctx.upstream.received_requests().await.unwrap_or_default();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].url.path(), route("gamma"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_refetch_on_every_request(ctx: &TestContext) {
    ctx.feeds()
        .serve_feed(route("alpha"), rss_document(&dated_items("Alpha", 1, 1, 1)))
        .await;

    fetch_items(ctx, "/api/rss-feed?sources=alpha").await;
    fetch_items(ctx, "/api/rss-feed?sources=alpha").await;

    let received = ctx.upstream.received_requests().await.unwrap_or_default();
    assert_eq!(received.len(), 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_non_get_methods(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/rss-feed", &json!({ "title": "x" }))
        .await
        .unwrap();
    response
        .assert_status(StatusCode::METHOD_NOT_ALLOWED)
        .assert_error("Method not allowed");

    let response = ctx.client.put("/api/rss-feed", &json!({})).await.unwrap();
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);

    let response = ctx.client.delete("/api/rss-feed").await.unwrap();
    response
        .assert_status(StatusCode::METHOD_NOT_ALLOWED)
        .assert_error("Method not allowed")
        .assert_header_exists("x-request-id");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_head_requests(ctx: &TestContext) {
    let response = ctx.client.head("/api/rss-feed").await.unwrap();
    response
        .assert_status(StatusCode::METHOD_NOT_ALLOWED)
        .assert_header_exists("x-request-id");

    let response = ctx.client.head("/api/rss-feed/sources").await.unwrap();
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_registered_sources(ctx: &TestContext) {
    let response = ctx.client.get("/api/rss-feed/sources").await.unwrap();
    response.assert_status(StatusCode::OK);

    let sources = response.json::<Vec<Value>>().unwrap();
    let expected: Vec<Value> = SOURCE_ROUTES
        .iter()
        .map(|(id, title, _)| {
            json!({
                "id": id,
                "title": title,
                "url": ctx.source_url(id),
            })
        })
        .collect();

    assert_eq!(sources, expected);
}
