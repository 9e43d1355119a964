//! Siegel HTTP API.
//!
//! Routes, configuration, and error mapping for the webhook verification
//! service. The actual signature check lives in `siegel-core`; this crate
//! owns the request/response wire formats.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;

pub use config::Config;
pub use error::ApiError;
pub use server::{create_router, start_server, AppState};
