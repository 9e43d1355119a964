//! Webhook receipt endpoint with signature verification.
//!
//! The request body is captured as raw bytes and the keyed digest is
//! computed over exactly what arrived on the wire, before any JSON parsing.

use anyhow::anyhow;
use axum::{extract::State, http::HeaderMap, Json};
use bytes::Bytes;
use serde::Serialize;
use siegel_core::Reason;
use tracing::{info, instrument};

use crate::{error::ApiError, server::AppState};

/// Response for an authenticated webhook delivery.
#[derive(Debug, Serialize)]
pub struct WebhookAccepted {
    /// Always true; present for callers that key on it.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: &'static str,
    /// Event topic as announced by the sender, if any.
    pub topic: Option<String>,
    /// Shop domain as announced by the sender, if any.
    pub shop: Option<String>,
}

/// Verifies an inbound webhook delivery against the shared secret.
///
/// Header lookup is case-insensitive (`HeaderMap` normalizes names). The
/// topic and shop headers are echoed back untrusted; only the signature is
/// load-bearing.
///
/// # Errors
///
/// - [`ApiError::MissingSignature`] (401) when the signature header is
///   absent.
/// - [`ApiError::InvalidSignature`] (401) when the recomputed digest does
///   not match the supplied value.
/// - [`ApiError::Processing`] (500) when the header value is not visible
///   ASCII.
#[instrument(
    name = "receive_webhook",
    skip(state, headers, body),
    fields(payload_size = body.len())
)]
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAccepted>, ApiError> {
    let supplied = match headers.get(state.signature_header.as_str()) {
        None => None,
        Some(value) => Some(
            value
                .to_str()
                .map_err(|e| anyhow!("signature header is not visible ASCII: {e}"))?,
        ),
    };

    let result = state.verifier.verify(&body, supplied);
    match result.reason {
        Reason::Ok => {},
        Reason::MissingSignatureHeader => return Err(ApiError::MissingSignature),
        Reason::SignatureMismatch => {
            return Err(ApiError::InvalidSignature {
                received: supplied.unwrap_or_default().to_string(),
            });
        },
    }

    let topic = header_string(&headers, "x-shopify-topic");
    let shop = header_string(&headers, "x-shopify-shop-domain");

    info!(
        topic = topic.as_deref().unwrap_or("unknown"),
        shop = shop.as_deref().unwrap_or("unknown"),
        "webhook verified"
    );

    Ok(Json(WebhookAccepted {
        success: true,
        message: "HMAC validation passed",
        topic,
        shop,
    }))
}

/// Extracts a header as an owned string, ignoring non-UTF8 values.
fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(String::from)
}
