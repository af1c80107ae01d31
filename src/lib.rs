//! castfeed - Podcast RSS feed server
//!
//! Serves a podcast channel as an RSS 2.0 document over HTTP.

pub mod config;
pub mod datetime;
pub mod error;
pub mod feed;
pub mod logging;
pub mod web;

pub use config::{Config, FeedConfig, LoggingConfig, ServerConfig, WebConfig};
pub use error::{CastfeedError, Result};
pub use feed::{sample_feed, to_xml, Channel, Dataset, Enclosure, Episode, Feed};
pub use web::{create_router, ApiError, WebServer};
