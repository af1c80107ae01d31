//! Compiled-in sample datasets.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Deserialize;

use super::{Channel, Enclosure, Episode, Feed};
use crate::datetime::format_pub_date;
use crate::CastfeedError;

/// Days between consecutive episodes.
const EPISODE_INTERVAL_DAYS: i64 = 7;

/// Sample data set served by the feed route.
///
/// Names are matched case-insensitively with surrounding whitespace ignored,
/// both in the config file and in `CASTFEED_DATASET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Dataset {
    /// Two episodes with GUIDs, media on the public bucket. Any origin may read it.
    #[default]
    Hosted,
    /// Three episodes without GUIDs, for the local development client.
    Local,
}

struct EpisodeSeed {
    title: &'static str,
    description: &'static str,
    content: &'static str,
    url: &'static str,
    media_type: &'static str,
}

const HOSTED_EPISODES: &[EpisodeSeed] = &[
    EpisodeSeed {
        title: "Guam is sinking!",
        description: "Oh no that can't be good.",
        content: "<p>Guam is sinking! that cant be good</p>",
        url: "https://hollyweb.s3.us-east-1.amazonaws.com/episode1.wav",
        media_type: "audio/wav",
    },
    EpisodeSeed {
        title: "Oscar Nominations (ft. Justin Johnson)",
        description: "Justin joins us to talk about Wishing Well and Gunston Road.",
        content: "<p>Oscar Nominations (ft. Justin Johnson)</p>",
        url: "https://hollyweb.s3.us-east-1.amazonaws.com/episode2.wav",
        media_type: "audio/wav",
    },
];

const LOCAL_EPISODES: &[EpisodeSeed] = &[
    EpisodeSeed {
        title: "Pilot",
        description: "Setting up the show and what to expect.",
        content: "<p>Welcome to the very first episode.</p>",
        url: "http://localhost:1323/media/episode1.mp3",
        media_type: "audio/mpeg",
    },
    EpisodeSeed {
        title: "Behind the Mic",
        description: "How the show gets recorded & edited.",
        content: "<p>Recording <em>and</em> editing, start to finish.</p>",
        url: "http://localhost:1323/media/episode2.mp3",
        media_type: "audio/mpeg",
    },
    EpisodeSeed {
        title: "Listener Questions",
        description: "Answering the questions you sent in.",
        content: "<p>Your questions, our answers.</p><ul><li>Gear</li><li>Guests</li></ul>",
        url: "http://localhost:1323/media/episode3.mp3",
        media_type: "audio/mpeg",
    },
];

const LOCAL_CORS_ORIGINS: &[&str] = &["http://localhost:3000", "http://127.0.0.1:3000"];

impl Dataset {
    /// Name used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Hosted => "hosted",
            Dataset::Local => "local",
        }
    }

    /// Default channel title.
    pub fn channel_title(&self) -> &'static str {
        match self {
            Dataset::Hosted => "My Podcast",
            Dataset::Local => "My Podcast (Local)",
        }
    }

    /// Default channel link.
    pub fn channel_link(&self) -> &'static str {
        "http://localhost:1323"
    }

    /// Origins allowed to read the feed when none are configured.
    pub fn default_cors_origins(&self) -> &'static [&'static str] {
        match self {
            Dataset::Hosted => &["*"],
            Dataset::Local => LOCAL_CORS_ORIGINS,
        }
    }

    /// Whether episodes carry a GUID in addition to their id.
    pub fn has_guids(&self) -> bool {
        matches!(self, Dataset::Hosted)
    }

    fn seeds(&self) -> &'static [EpisodeSeed] {
        match self {
            Dataset::Hosted => HOSTED_EPISODES,
            Dataset::Local => LOCAL_EPISODES,
        }
    }

    /// Publish time of the first episode.
    pub fn base_time(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_default()
    }

    /// Build the feed for this dataset.
    ///
    /// Episodes are numbered from 1 and published one week apart starting at
    /// [`Dataset::base_time`]. Dates are rendered in `timezone`.
    pub fn build(&self, title: &str, link: &str, timezone: &str) -> Feed {
        let base = self.base_time();

        let items = self
            .seeds()
            .iter()
            .zip(1u32..)
            .map(|(seed, id)| {
                let published = base + Duration::days(EPISODE_INTERVAL_DAYS * i64::from(id - 1));
                Episode {
                    guid: self.has_guids().then(|| id.to_string()),
                    id,
                    title: seed.title.to_string(),
                    pub_date: format_pub_date(&published, timezone),
                    description: seed.description.to_string(),
                    content: seed.content.to_string(),
                    enclosures: vec![Enclosure::new(seed.url, seed.media_type)],
                }
            })
            .collect();

        Feed::new(Channel {
            title: title.to_string(),
            link: link.to_string(),
            items,
        })
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dataset {
    type Err = CastfeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hosted" => Ok(Dataset::Hosted),
            "local" => Ok(Dataset::Local),
            other => Err(CastfeedError::Config(format!("unknown dataset: {other}"))),
        }
    }
}

impl TryFrom<String> for Dataset {
    type Error = CastfeedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Build the default sample feed.
pub fn sample_feed() -> Feed {
    let dataset = Dataset::default();
    dataset.build(dataset.channel_title(), dataset.channel_link(), "UTC")
}
