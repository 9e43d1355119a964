//! Configuration management for the Siegel webhook verification service.

use std::{net::SocketAddr, str::FromStr};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use siegel_core::SharedSecret;

const CONFIG_FILE: &str = "config.toml";

/// Service configuration with defaults, file, and environment overrides.
///
/// Configuration is loaded in priority order:
/// 1. Environment variables (highest priority)
/// 2. Configuration file (`config.toml`)
/// 3. Built-in defaults (lowest priority)
///
/// The service starts without any configuration, but an empty webhook
/// secret means every delivery fails verification; set `WEBHOOK_SECRET`
/// before pointing real traffic at it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server
    /// Server bind address.
    ///
    /// Environment variable: `HOST`
    #[serde(default = "default_host", alias = "HOST")]
    pub host: String,
    /// Server bind port.
    ///
    /// Environment variable: `PORT`
    #[serde(default = "default_port", alias = "PORT")]
    pub port: u16,
    /// HTTP request timeout in seconds.
    ///
    /// Environment variable: `REQUEST_TIMEOUT`
    #[serde(default = "default_request_timeout", alias = "REQUEST_TIMEOUT")]
    pub request_timeout: u64,

    // Verification
    /// Shared secret for webhook signature verification.
    ///
    /// Never serialized: the figment defaults provider must not emit the
    /// redaction marker as a value.
    ///
    /// Environment variable: `WEBHOOK_SECRET`
    #[serde(default, skip_serializing, alias = "WEBHOOK_SECRET")]
    pub webhook_secret: SharedSecret,
    /// Request header carrying the base64 signature.
    ///
    /// Environment variable: `SIGNATURE_HEADER`
    #[serde(default = "default_signature_header", alias = "SIGNATURE_HEADER")]
    pub signature_header: String,

    // Logging
    /// Log level configuration.
    ///
    /// Environment variable: `RUST_LOG`
    #[serde(default = "default_log_level", alias = "RUST_LOG")]
    pub rust_log: String,
}

impl Config {
    /// Load configuration from defaults, config file, and environment
    /// variable overrides.
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(""));

        let config: Self = figment.extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Parse server socket address from host and port configuration.
    pub fn parse_server_addr(&self) -> Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);
        SocketAddr::from_str(&addr_str).context("Invalid server address")
    }

    /// Whether a non-empty webhook secret is configured.
    ///
    /// Safe to log; the secret itself never is.
    pub fn secret_configured(&self) -> bool {
        !self.webhook_secret.is_empty()
    }

    /// Validate configuration values.
    ///
    /// An empty webhook secret passes validation on purpose: verification
    /// must still execute against it rather than short-circuit, so startup
    /// only warns.
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }

        if self.request_timeout == 0 {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        if self.signature_header.is_empty() {
            anyhow::bail!("signature_header must not be empty");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            webhook_secret: SharedSecret::default(),
            signature_header: default_signature_header(),
            rust_log: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_signature_header() -> String {
    "x-shopify-hmac-sha256".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
