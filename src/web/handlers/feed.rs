//! Feed handlers for the Web API.

use axum::{
    extract::State,
    http::{header, Uri},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::feed::{to_xml, Feed, RSS_CONTENT_TYPE};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Greeting returned by the root route.
pub const GREETING: &str = "Hello, World!";

/// GET / - Liveness check.
pub async fn hello() -> &'static str {
    GREETING
}

/// GET /api/feed - The podcast feed as an RSS document.
pub async fn get_feed(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let feed = state.build_feed();
    render_feed(&feed)
}

/// Serialize a feed into an RSS response.
pub fn render_feed(feed: &Feed) -> Result<Response, ApiError> {
    render_feed_with(feed, to_xml)
}

/// Serialize a feed with `serialize` into an RSS response.
///
/// A serialization failure becomes a 500 with the generic JSON error body.
pub fn render_feed_with<F>(feed: &Feed, serialize: F) -> Result<Response, ApiError>
where
    F: FnOnce(&Feed) -> crate::Result<String>,
{
    let body = serialize(feed)?;

    tracing::debug!(items = feed.len(), bytes = body.len(), "Rendered feed");

    Ok(([(header::CONTENT_TYPE, RSS_CONTENT_TYPE)], body).into_response())
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}
