//! Unified error type for backend and storage operations.

use std::time::Duration;

use resell_core::flow::Advisory;
use thiserror::Error;

/// Errors that can occur when talking to the Resell backend or object
/// storage.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned an unexpected status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated for logging.
        message: String,
    },

    /// Response body could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Submission attempted without a brand selection. Raised before any
    /// network call.
    #[error("no brand selected")]
    BrandMissing,

    /// The generation endpoint did not accept the job (non-201 response).
    #[error("generation backend is overloaded")]
    Overloaded,

    /// The selected file is not an image the backend accepts.
    #[error("unsupported image: {0}")]
    InvalidImage(String),

    /// `create-user` did not return a session token.
    #[error("create-user response did not include a session token")]
    MissingToken,

    /// The poll loop hit its terminal timeout without a result.
    #[error("no generation after {}s", .waited.as_secs())]
    TimedOut {
        /// How long the loop waited before giving up.
        waited: Duration,
    },
}

impl ClientError {
    /// The user-facing advisory for this error, if it maps to one of the
    /// modeled recovery messages. Other failures are generic transient
    /// errors surfaced with a manual-retry affordance.
    #[must_use]
    pub fn advisory(&self) -> Option<Advisory> {
        match self {
            Self::BrandMissing => Some(Advisory::BrandMissing),
            Self::Overloaded => Some(Advisory::Overloaded),
            Self::TimedOut { .. } => Some(Advisory::TimedOut),
            _ => None,
        }
    }
}
