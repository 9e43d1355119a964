//! Shared-secret handling.
//!
//! The signing secret is held in a wrapper that zeroizes its contents on
//! drop and redacts itself in `Debug`, `Display`, and serialized output.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Pre-provisioned key known to both the webhook sender and this verifier.
///
/// The underlying bytes are cleared from memory when the value is dropped.
/// An empty secret is representable on purpose: verification runs with the
/// empty key rather than short-circuiting, so callers cannot distinguish an
/// unconfigured secret from a wrong one.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    inner: String,
}

impl SharedSecret {
    /// Wraps a secret string.
    pub fn new(secret: String) -> Self {
        Self { inner: secret }
    }

    /// Returns the raw secret bytes for keyed-hash computation.
    ///
    /// The value must not end up in logs, serialized output, or responses.
    pub fn expose_secret(&self) -> &str {
        &self.inner
    }

    /// Length of the secret without exposing it.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the secret is empty without exposing it.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSecret").field("inner", &"[REDACTED]").finish()
    }
}

impl fmt::Display for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl From<String> for SharedSecret {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

impl From<&str> for SharedSecret {
    fn from(secret: &str) -> Self {
        Self::new(secret.to_string())
    }
}

impl Serialize for SharedSecret {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str("[REDACTED]")
    }
}

impl<'de> Deserialize<'de> for SharedSecret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secret = String::deserialize(deserializer)?;
        Ok(Self::new(secret))
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.inner.as_bytes().ct_eq(other.inner.as_bytes()).into()
    }
}

impl Eq for SharedSecret {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_wrapped_value() {
        let secret = SharedSecret::new("hook-secret".to_string());
        assert_eq!(secret.expose_secret(), "hook-secret");
        assert_eq!(secret.len(), 11);
        assert!(!secret.is_empty());
    }

    #[test]
    fn default_is_empty() {
        let secret = SharedSecret::default();
        assert!(secret.is_empty());
        assert_eq!(secret.expose_secret(), "");
    }

    #[test]
    fn debug_and_display_redact() {
        let secret = SharedSecret::from("hook-secret");
        assert!(!format!("{secret:?}").contains("hook-secret"));
        assert_eq!(secret.to_string(), "[REDACTED]");
    }

    #[test]
    fn serialization_redacts() {
        let secret = SharedSecret::from("hook-secret");
        let serialized = serde_json::to_string(&secret).unwrap();
        assert_eq!(serialized, "\"[REDACTED]\"");
    }

    #[test]
    fn deserializes_plain_string() {
        let secret: SharedSecret = serde_json::from_str("\"from-config\"").unwrap();
        assert_eq!(secret.expose_secret(), "from-config");
    }

    #[test]
    fn equality_holds_for_same_value() {
        assert_eq!(SharedSecret::from("a"), SharedSecret::from("a"));
        assert_ne!(SharedSecret::from("a"), SharedSecret::from("b"));
        assert_ne!(SharedSecret::from("a"), SharedSecret::from("aa"));
    }
}
