//! Error taxonomy for webhook request handling.
//!
//! Every failure here is terminal for the request: a forged or corrupted
//! signature will not become valid on retry, and processing failures almost
//! always indicate a malformed client rather than a transient fault.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Failures while handling a webhook delivery.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured signature header was absent from the request.
    #[error("signature header missing")]
    MissingSignature,

    /// A signature was supplied but did not match the recomputed digest.
    #[error("signature mismatch")]
    InvalidSignature {
        /// The signature value the caller supplied.
        received: String,
    },

    /// Reading the request or computing the digest failed.
    #[error("webhook processing failed")]
    Processing(#[from] anyhow::Error),
}

/// Body of a 401 rejection.
///
/// Only the caller's own `received` value is ever echoed; the digest
/// computed from the secret never leaves the process.
#[derive(Debug, Serialize)]
struct RejectionBody {
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    received: Option<String>,
}

/// Body of a 500 response. Details stay in the logs.
#[derive(Debug, Serialize)]
struct ProcessingBody {
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingSignature => {
                warn!(reason = "missing_signature_header", "webhook rejected");
                let body = RejectionBody { message: "Missing signature", received: None };
                (StatusCode::UNAUTHORIZED, Json(body)).into_response()
            },
            Self::InvalidSignature { received } => {
                warn!(reason = "signature_mismatch", "webhook rejected");
                let body = RejectionBody { message: "Invalid signature", received: Some(received) };
                (StatusCode::UNAUTHORIZED, Json(body)).into_response()
            },
            Self::Processing(err) => {
                error!(error = %err, "webhook processing failed");
                let body = ProcessingBody { error: "webhook processing failed" };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            },
        }
    }
}
