use axum::{http::Uri, middleware, routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod request_id;

pub use request_id::{request_id_middleware, X_REQUEST_ID};

use crate::controllers::{feed::FeedController, health};
use crate::domain::feed::FeedService;
use crate::error::AppError;
use crate::infrastructure::config::Config;

/// Assemble every route and the shared middleware stack
pub fn build_router(feed_service: Arc<FeedService>, feed_controller: Arc<FeedController>) -> Router {
    // Feed routes (public, GET only; axum would otherwise answer HEAD via get)
    let feed_routes = Router::new()
        .route(
            "/api/rss-feed",
            get(FeedController::get_feed)
                .head(FeedController::method_not_allowed)
                .fallback(FeedController::method_not_allowed),
        )
        .route(
            "/api/rss-feed/sources",
            get(FeedController::list_sources)
                .head(FeedController::method_not_allowed)
                .fallback(FeedController::method_not_allowed),
        )
        .with_state(feed_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(feed_service)
        .merge(feed_routes)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_id_middleware)),
        )
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Bind to the configured address and serve until the process is stopped
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
