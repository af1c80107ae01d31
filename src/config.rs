//! Configuration module for castfeed.

use serde::Deserialize;
use std::path::Path;

use crate::datetime::is_known_timezone;
use crate::feed::{Dataset, Feed};
use crate::{CastfeedError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    1323
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. Empty disables file logging.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/castfeed.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Feed configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Sample dataset served by the feed route.
    #[serde(default)]
    pub dataset: Dataset,
    /// Channel title. Falls back to the dataset's title.
    #[serde(default)]
    pub title: Option<String>,
    /// Channel link. Falls back to the dataset's link.
    #[serde(default)]
    pub link: Option<String>,
    /// Timezone for rendering publish dates (e.g., "UTC", "America/Chicago").
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            dataset: Dataset::default(),
            title: None,
            link: None,
            timezone: default_timezone(),
        }
    }
}

impl FeedConfig {
    /// Channel title after applying the dataset default.
    pub fn channel_title(&self) -> &str {
        self.title
            .as_deref()
            .unwrap_or_else(|| self.dataset.channel_title())
    }

    /// Channel link after applying the dataset default.
    pub fn channel_link(&self) -> &str {
        self.link
            .as_deref()
            .unwrap_or_else(|| self.dataset.channel_link())
    }

    /// Build a fresh feed for this configuration.
    pub fn build(&self) -> Feed {
        self.dataset
            .build(self.channel_title(), self.channel_link(), &self.timezone)
    }
}

/// Web configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// CORS allowed origins. Unset means the dataset's defaults; `*` allows any origin.
    #[serde(default)]
    pub cors_origins: Option<Vec<String>>,
    /// Whether to gzip responses for clients that accept it.
    #[serde(default = "default_compression")]
    pub compression: bool,
}

fn default_compression() -> bool {
    true
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            cors_origins: None,
            compression: default_compression(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Feed configuration.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Web configuration.
    #[serde(default)]
    pub web: WebConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(CastfeedError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| CastfeedError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `CASTFEED_HOST`: bind address
    /// - `CASTFEED_PORT`: listen port
    /// - `CASTFEED_LOG_LEVEL`: log level
    /// - `CASTFEED_DATASET`: sample dataset (`hosted` or `local`)
    /// - `CASTFEED_CORS_ORIGINS`: comma-separated list of allowed origins
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides using the given variable lookup. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = var("CASTFEED_HOST") {
            self.server.host = host.trim().to_string();
        }

        if let Some(port) = var("CASTFEED_PORT") {
            self.server.port = port.trim().parse().map_err(|_| {
                CastfeedError::Config(format!("CASTFEED_PORT is not a valid port: {port}"))
            })?;
        }

        if let Some(level) = var("CASTFEED_LOG_LEVEL") {
            self.logging.level = level.trim().to_string();
        }

        if let Some(dataset) = var("CASTFEED_DATASET") {
            self.feed.dataset = dataset.parse()?;
        }

        if let Some(origins) = var("CASTFEED_CORS_ORIGINS") {
            self.web.cors_origins = Some(
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect(),
            );
        }

        Ok(())
    }

    /// CORS origins after applying the dataset default.
    pub fn cors_origins(&self) -> Vec<String> {
        match &self.web.cors_origins {
            Some(origins) => origins.clone(),
            None => self
                .feed
                .dataset
                .default_cors_origins()
                .iter()
                .map(|o| o.to_string())
                .collect(),
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The server host is empty
    /// - The channel title is empty
    /// - The channel title or link contains control characters
    /// - The channel link is not an absolute http(s) URL
    ///
    /// An unknown timezone is logged and publish dates fall back to UTC.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(CastfeedError::Validation(
                "server host must not be empty".to_string(),
            ));
        }

        if self.feed.channel_title().trim().is_empty() {
            return Err(CastfeedError::Validation(
                "feed title must not be empty".to_string(),
            ));
        }

        for (field, value) in [
            ("title", self.feed.channel_title()),
            ("link", self.feed.channel_link()),
        ] {
            if value.chars().any(char::is_control) {
                return Err(CastfeedError::Validation(format!(
                    "feed {field} must not contain control characters: {value:?}"
                )));
            }
        }

        if !is_known_timezone(&self.feed.timezone) {
            tracing::warn!(
                timezone = %self.feed.timezone,
                "Unknown feed timezone, publish dates will use UTC"
            );
        }

        let link = self.feed.channel_link();
        match url::Url::parse(link) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
            _ => Err(CastfeedError::Validation(format!(
                "feed link must be an absolute http(s) URL: {link}"
            ))),
        }
    }
}
