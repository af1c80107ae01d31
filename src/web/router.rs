//! Router configuration for the Web API.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{get_feed, hello, not_found, AppState};
use super::middleware::create_cors_layer;

/// Create the main router.
///
/// Routes:
/// - `GET /` - plain-text greeting
/// - `GET /api/feed` - the podcast feed
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let api_routes = Router::new().route("/feed", get(get_feed));

    Router::new()
        .route("/", get(hello))
        .nest("/api", api_routes)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}
