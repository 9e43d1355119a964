//! Health and liveness probes.
//!
//! The service has no external dependencies to check; the probes confirm
//! the HTTP server is up and report version information for monitoring.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, instrument};

/// Health check response structure.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service health status.
    pub status: &'static str,
    /// Timestamp when the health check was performed.
    pub timestamp: DateTime<Utc>,
    /// Service version information.
    pub version: String,
}

/// Health check endpoint handler.
///
/// Called frequently by orchestration systems and load balancers, so it
/// avoids expensive operations.
#[instrument(name = "health_check")]
pub async fn health_check() -> Response {
    debug!("performing health check");

    let response = HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Liveness check endpoint for orchestration probes.
///
/// Minimal check that the process is alive and responding.
#[instrument(name = "liveness_check")]
pub async fn liveness_check() -> Response {
    let response = serde_json::json!({
        "status": "alive",
        "timestamp": Utc::now(),
        "service": "siegel-api",
    });

    (StatusCode::OK, Json(response)).into_response()
}
