use rss_aggregator::controllers::feed::FeedController;
use rss_aggregator::domain::feed::FeedService;
use rss_aggregator::infrastructure::config::{Config, LogFormat};
use rss_aggregator::infrastructure::http::{build_router, start_http_server};
use rss_aggregator::infrastructure::parsers::feed_parser_for;
use rss_aggregator::infrastructure::repositories::{HardcodedFeedSourceRepository, HttpFeedClient};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting RSS aggregator on {}:{}",
        config.host,
        config.port
    );
    tracing::info!(
        environment = ?config.environment,
        parser = ?config.feed_parser,
        fetch_timeout_secs = config.feed_fetch_timeout_secs,
        "Feed pipeline configuration"
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    let source_repo = Arc::new(HardcodedFeedSourceRepository::new());
    let feed_client = Arc::new(HttpFeedClient::new(
        config.feed_user_agent.clone(),
        config.feed_fetch_timeout(),
    ));
    let feed_parser = feed_parser_for(config.feed_parser);

    let feed_service = Arc::new(FeedService::new(source_repo, feed_client, feed_parser));
    let feed_controller = Arc::new(FeedController::new(feed_service.clone()));

    let app = build_router(feed_service, feed_controller);

    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_development() {
        "rss_aggregator=debug,tower_http=debug"
    } else {
        "rss_aggregator=info,tower_http=info"
    };

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
