//! Web API module for castfeed.
//!
//! Serves the podcast feed over HTTP alongside a plain-text liveness route.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
