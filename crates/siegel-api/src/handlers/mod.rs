//! HTTP request handlers for the Siegel API.
//!
//! Handlers follow a consistent pattern: raw input capture, verification
//! before any payload parsing, tracing for observability, and standardized
//! JSON responses via [`crate::error::ApiError`].

pub mod health;
pub mod webhooks;

pub use health::{health_check, liveness_check};
pub use webhooks::receive_webhook;
