//! Domain types for webhook request authenticity.
//!
//! Provides the shared-secret primitive and the signature verifier used by
//! the HTTP layer. Everything here is transport-agnostic: the verifier sees
//! raw payload bytes and a header-supplied signature value, nothing else.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod secret;
pub mod verify;

pub use secret::SharedSecret;
pub use verify::{Reason, VerificationResult, Verifier};
