//! Error types for castfeed.

use thiserror::Error;

/// Common error type for castfeed.
#[derive(Error, Debug)]
pub enum CastfeedError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Validation error for configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// XML serialization error.
    #[error("XML error: {0}")]
    Xml(String),

    /// Feed data violates a feed invariant.
    #[error("invalid feed: {0}")]
    InvalidFeed(String),
}

/// Result type alias for castfeed operations.
pub type Result<T> = std::result::Result<T, CastfeedError>;
