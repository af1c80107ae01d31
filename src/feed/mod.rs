//! Podcast feed model for castfeed.
//!
//! A [`Feed`] is an RSS 2.0 document with a single channel of episodes.
//! Feeds are built fresh from a [`Dataset`] for every request and are never
//! mutated after construction.

pub mod dataset;
pub mod writer;

pub use dataset::{sample_feed, Dataset};
pub use writer::{to_xml, RSS_CONTENT_TYPE};

use std::collections::HashSet;

use crate::datetime::parse_pub_date;
use crate::{CastfeedError, Result};

/// RSS version written on the root element.
pub const RSS_VERSION: &str = "2.0";

/// Namespace URI bound to the `content` prefix.
pub const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";

/// A media file attached to an episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enclosure {
    /// Absolute URL of the media file.
    pub url: String,
    /// MIME type of the media file.
    pub media_type: String,
}

impl Enclosure {
    /// Create a new enclosure.
    pub fn new(url: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            media_type: media_type.into(),
        }
    }
}

/// One podcast installment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    /// Globally unique identifier, when the dataset carries one.
    pub guid: Option<String>,
    /// Episode number, unique within the feed.
    pub id: u32,
    /// Episode title.
    pub title: String,
    /// Publish date in RFC 1123 format with a numeric zone.
    pub pub_date: String,
    /// Plain-text summary.
    pub description: String,
    /// HTML body.
    pub content: String,
    /// Attached media files.
    pub enclosures: Vec<Enclosure>,
}

/// Channel metadata and its episodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    /// Channel title.
    pub title: String,
    /// Channel link.
    pub link: String,
    /// Episodes in publish order.
    pub items: Vec<Episode>,
}

/// Top-level RSS document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    /// RSS version.
    pub version: &'static str,
    /// Namespace bound to the `content` prefix.
    pub content_namespace: &'static str,
    /// The feed's channel.
    pub channel: Channel,
}

impl Feed {
    /// Create a feed around the given channel.
    pub fn new(channel: Channel) -> Self {
        Self {
            version: RSS_VERSION,
            content_namespace: CONTENT_NAMESPACE,
            channel,
        }
    }

    /// Number of episodes in the feed.
    pub fn len(&self) -> usize {
        self.channel.items.len()
    }

    /// Whether the feed has no episodes.
    pub fn is_empty(&self) -> bool {
        self.channel.items.is_empty()
    }

    /// Check the feed invariants.
    ///
    /// Returns an error naming the first violation if:
    /// - The channel has no episodes
    /// - Two episodes share an id
    /// - An episode has no enclosure, or an enclosure with an empty url or type
    /// - A publish date does not parse, or is earlier than the previous one
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(CastfeedError::InvalidFeed(
                "channel has no items".to_string(),
            ));
        }

        let mut ids = HashSet::new();
        let mut previous = None;

        for item in &self.channel.items {
            if !ids.insert(item.id) {
                return Err(CastfeedError::InvalidFeed(format!(
                    "duplicate item id {}",
                    item.id
                )));
            }

            if item.enclosures.is_empty() {
                return Err(CastfeedError::InvalidFeed(format!(
                    "item {} has no enclosure",
                    item.id
                )));
            }

            if item
                .enclosures
                .iter()
                .any(|e| e.url.trim().is_empty() || e.media_type.trim().is_empty())
            {
                return Err(CastfeedError::InvalidFeed(format!(
                    "item {} has an enclosure without url or type",
                    item.id
                )));
            }

            let published = parse_pub_date(&item.pub_date).ok_or_else(|| {
                CastfeedError::InvalidFeed(format!(
                    "item {} has an invalid pubDate: {}",
                    item.id, item.pub_date
                ))
            })?;

            if let Some(prev) = previous {
                if published < prev {
                    return Err(CastfeedError::InvalidFeed(format!(
                        "item {} is published before the item preceding it",
                        item.id
                    )));
                }
            }
            previous = Some(published);
        }

        Ok(())
    }
}
