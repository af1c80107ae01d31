//! API handlers for the feed server.

pub mod feed;

pub use feed::*;

use crate::config::FeedConfig;
use crate::feed::Feed;

/// Application state shared by all handlers.
///
/// Immutable after startup; every request builds its own feed from it.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Feed configuration.
    pub feed: FeedConfig,
}

impl AppState {
    /// Create a new application state.
    pub fn new(feed: FeedConfig) -> Self {
        Self { feed }
    }

    /// Build a fresh feed for one request.
    pub fn build_feed(&self) -> Feed {
        self.feed.build()
    }
}
