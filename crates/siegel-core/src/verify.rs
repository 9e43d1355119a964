//! Keyed-hash verification of webhook deliveries.
//!
//! Recomputes the HMAC-SHA256 digest of the raw request body under the
//! shared secret and compares it, in constant time, to the value the sender
//! supplied in the signature header. The digest travels base64-encoded on
//! the wire (Shopify convention).

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::secret::SharedSecret;

type HmacSha256 = Hmac<Sha256>;

/// Why a verification attempt produced its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// The supplied signature matches the recomputed digest.
    Ok,
    /// No signature value was supplied with the request.
    MissingSignatureHeader,
    /// A signature was supplied but does not match the recomputed digest.
    SignatureMismatch,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::MissingSignatureHeader => write!(f, "missing_signature_header"),
            Self::SignatureMismatch => write!(f, "signature_mismatch"),
        }
    }
}

/// Outcome of verifying a single webhook delivery.
///
/// `authentic` is true exactly when `reason` is [`Reason::Ok`]; the
/// constructors are the only way to build a value, so the two fields cannot
/// disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    /// Whether the delivery was produced by a holder of the shared secret.
    pub authentic: bool,
    /// Diagnostic classification of the outcome.
    pub reason: Reason,
}

impl VerificationResult {
    /// The supplied signature matched.
    pub fn ok() -> Self {
        Self { authentic: true, reason: Reason::Ok }
    }

    /// No signature was supplied.
    pub fn missing_signature() -> Self {
        Self { authentic: false, reason: Reason::MissingSignatureHeader }
    }

    /// The supplied signature did not match.
    pub fn mismatch() -> Self {
        Self { authentic: false, reason: Reason::SignatureMismatch }
    }
}

/// Verifies that inbound payloads were produced by a holder of the shared
/// secret.
///
/// Holds the read-only secret for the lifetime of the process; verification
/// itself is a pure computation with no retained state, so one instance can
/// be shared across any number of concurrent requests.
///
/// # Example
///
/// ```
/// use siegel_core::{SharedSecret, Verifier};
///
/// let verifier = Verifier::new(SharedSecret::from("hook-secret"));
/// let body = br#"{"id":1}"#;
///
/// let signature = verifier.signature(body);
/// assert!(verifier.verify(body, Some(&signature)).authentic);
/// assert!(!verifier.verify(body, None).authentic);
/// ```
pub struct Verifier {
    secret: SharedSecret,
}

impl Verifier {
    /// Creates a verifier for the given shared secret.
    pub fn new(secret: SharedSecret) -> Self {
        Self { secret }
    }

    /// Computes the base64-encoded HMAC-SHA256 digest of `raw_body`.
    pub fn signature(&self, raw_body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(raw_body);
        BASE64.encode(mac.finalize().into_bytes())
    }

    /// Checks a header-supplied signature against the recomputed digest.
    ///
    /// `raw_body` must be the exact bytes received on the wire, captured
    /// before any parsing; a re-serialized payload hashes differently.
    /// An empty secret does not short-circuit: the digest is computed with
    /// the empty key and the comparison runs, so the response shape never
    /// reveals whether a secret is configured.
    pub fn verify(&self, raw_body: &[u8], supplied: Option<&str>) -> VerificationResult {
        let Some(supplied) = supplied else {
            return VerificationResult::missing_signature();
        };

        let expected = self.signature(raw_body);
        if constant_time_eq(expected.as_bytes(), supplied.as_bytes()) {
            VerificationResult::ok()
        } else {
            VerificationResult::mismatch()
        }
    }
}

/// Constant-time comparison of the two encoded digests.
///
/// `subtle` keeps the comparison resistant to compiler optimizations that
/// would reintroduce early exits; values of unequal length compare unequal
/// without inspecting content.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier(secret: &str) -> Verifier {
        Verifier::new(SharedSecret::from(secret))
    }

    #[test]
    fn signed_body_verifies() {
        let v = verifier("hook-secret");
        let body = br#"{"id":820982911946154508,"topic":"orders/create"}"#;

        let signature = v.signature(body);
        let result = v.verify(body, Some(&signature));

        assert!(result.authentic);
        assert_eq!(result.reason, Reason::Ok);
    }

    #[test]
    fn rfc4231_case_2_digest() {
        // HMAC-SHA256 test vector (key "Jefe"), digest re-encoded as base64.
        let v = verifier("Jefe");
        let signature = v.signature(b"what do ya want for nothing?");
        assert_eq!(signature, "W9zBRr9gdU5qBCQmCJV1x1oAPwidJzmDnexYuWTsOEM=");
    }

    #[test]
    fn known_signature_accepted_and_every_mutation_rejected() {
        let v = verifier("shhh");
        let body = br#"{"id":1,"topic":"orders/create"}"#;
        let signature = "TtE2Yq6GyEq408VcqUOZmSSf4v95K5tgRXPI90ZsdZw=";

        assert_eq!(v.signature(body), signature);
        assert!(v.verify(body, Some(signature)).authentic);

        for i in 0..signature.len() {
            let mut tampered: Vec<char> = signature.chars().collect();
            tampered[i] = if tampered[i] == 'A' { 'B' } else { 'A' };
            let tampered: String = tampered.into_iter().collect();

            let result = v.verify(body, Some(&tampered));
            assert!(!result.authentic, "mutation at {i} must be rejected");
            assert_eq!(result.reason, Reason::SignatureMismatch);
        }
    }

    #[test]
    fn single_body_byte_flips_outcome() {
        let v = verifier("testsecret");

        let signature = v.signature(br#"{"a":1}"#);
        assert_eq!(signature, "D0pgSp6a0YIDSzIk+2FySp7xJ8LV3jVUmVzDH5zDxJk=");
        assert_eq!(v.signature(br#"{"a":2}"#), "JSnR18lyPUnUo4SfkOJmDz/WRD+CgSNIaDX1PaLkEeY=");

        assert!(v.verify(br#"{"a":1}"#, Some(&signature)).authentic);
        let result = v.verify(br#"{"a":2}"#, Some(&signature));
        assert!(!result.authentic);
        assert_eq!(result.reason, Reason::SignatureMismatch);
    }

    #[test]
    fn absent_signature_is_distinguishable_from_mismatch() {
        let v = verifier("hook-secret");

        let result = v.verify(b"payload", None);
        assert!(!result.authentic);
        assert_eq!(result.reason, Reason::MissingSignatureHeader);
    }

    #[test]
    fn empty_supplied_signature_is_a_mismatch() {
        let v = verifier("hook-secret");

        let result = v.verify(b"payload", Some(""));
        assert!(!result.authentic);
        assert_eq!(result.reason, Reason::SignatureMismatch);
    }

    #[test]
    fn empty_secret_still_computes() {
        let v = verifier("");

        // The digest under the empty key is well-defined and verifiable.
        assert_eq!(v.signature(b"x"), "TLyWCZpkZ84AJGHxBUm0iYJl6+YYi0XvrMRCk1FuYsQ=");
        assert!(v.verify(b"x", Some("TLyWCZpkZ84AJGHxBUm0iYJl6+YYi0XvrMRCk1FuYsQ=")).authentic);

        let result = v.verify(b"x", Some("bm90LXRoZS1yaWdodC1kaWdlc3Q="));
        assert_eq!(result.reason, Reason::SignatureMismatch);
    }

    #[test]
    fn signature_is_deterministic() {
        let v = verifier("hook-secret");
        let body = b"payload bytes";

        assert_eq!(v.signature(body), v.signature(body));
        assert_eq!(v.signature(body).len(), 44); // base64 of a 32-byte digest
    }

    #[test]
    fn reason_display_matches_wire_names() {
        assert_eq!(Reason::Ok.to_string(), "ok");
        assert_eq!(Reason::MissingSignatureHeader.to_string(), "missing_signature_header");
        assert_eq!(Reason::SignatureMismatch.to_string(), "signature_mismatch");
    }

    #[test]
    fn reason_serializes_snake_case() {
        let value = serde_json::to_value(VerificationResult::missing_signature()).unwrap();
        assert_eq!(value["authentic"], false);
        assert_eq!(value["reason"], "missing_signature_header");
    }

    #[test]
    fn constant_time_eq_handles_unequal_lengths() {
        assert!(constant_time_eq(b"", b""));
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }
}
