//! Middleware for the Web API.

pub mod cors;

pub use cors::{allows_any_origin, create_cors_layer};
