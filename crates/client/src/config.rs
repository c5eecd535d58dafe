//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `RESELL_BACKEND_URL` - Base URL of the generation backend
//!
//! ## Optional
//! - `RESELL_STORAGE_URL` - Object storage base URL for photo uploads
//!   (default: the production seller-images bucket)
//! - `RESELL_POLL_INTERVAL_MS` - Poll interval while generating (default: 500)
//! - `RESELL_POLL_WARN_SECS` - When to start warning the user (default: 30)
//! - `RESELL_POLL_TIMEOUT_SECS` - Terminal poll timeout (default: 120)
//! - `RESELL_REQUEST_TIMEOUT_SECS` - Per-request HTTP timeout (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN (consumed by the CLI binary)

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::poll::PollPolicy;

/// Default object-storage bucket, agreed with the backend out of band.
const DEFAULT_STORAGE_URL: &str = "https://seller-images-milk.s3.amazonaws.com";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Resell client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the generation backend.
    pub backend_url: Url,
    /// Base URL of the object-storage bucket for photo uploads.
    pub storage_url: Url,
    /// Polling policy used while a generation is in flight.
    pub poll: PollPolicy,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// Sentry DSN for error tracking.
    pub sentry_dsn: Option<String>,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `RESELL_BACKEND_URL` is missing or any
    /// variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let backend_url = get_url(&get_required_env("RESELL_BACKEND_URL")?, "RESELL_BACKEND_URL")?;
        let storage_url = get_url(
            &get_env_or_default("RESELL_STORAGE_URL", DEFAULT_STORAGE_URL),
            "RESELL_STORAGE_URL",
        )?;

        let poll = PollPolicy {
            interval: Duration::from_millis(get_parsed_env(
                "RESELL_POLL_INTERVAL_MS",
                PollPolicy::DEFAULT_INTERVAL_MS,
            )?),
            warn_after: Duration::from_secs(get_parsed_env(
                "RESELL_POLL_WARN_SECS",
                PollPolicy::DEFAULT_WARN_SECS,
            )?),
            timeout: Duration::from_secs(get_parsed_env(
                "RESELL_POLL_TIMEOUT_SECS",
                PollPolicy::DEFAULT_TIMEOUT_SECS,
            )?),
        };

        let request_timeout = Duration::from_secs(get_parsed_env(
            "RESELL_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);

        Ok(Self {
            backend_url,
            storage_url,
            poll,
            request_timeout,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
        })
    }

    /// Build a configuration for a known backend, with defaults elsewhere.
    ///
    /// Used by tests pointing the client at a local mock server.
    #[must_use]
    pub fn for_backend(backend_url: Url) -> Self {
        #[allow(clippy::unwrap_used)] // constant is a valid URL
        let storage_url = Url::parse(DEFAULT_STORAGE_URL).unwrap();
        Self {
            backend_url,
            storage_url,
            poll: PollPolicy::default(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            sentry_dsn: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable into a number, falling back to a default.
fn get_parsed_env(key: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

/// Parse a URL, attributing failures to the variable that held it.
fn get_url(raw: &str, key: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
