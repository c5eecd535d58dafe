//! Integration tests for the Resell client.
//!
//! Every test runs against a `wiremock` mock of the generation backend; no
//! real backend or bucket is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p resell-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session` - Bootstrap, token rotation, backend rejection
//! - `generation_flow` - Submission validation, upload, the full
//!   upload-submit-poll-classify flow
//! - `polling` - Bounded polling: completion, terminal timeout, failure cap

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::MockServer;

use resell_client::{BackendClient, ClientConfig, PollPolicy};

/// Start a mock backend and a client pointed at it.
///
/// # Panics
///
/// Panics if the mock server or client fails to start.
pub async fn mock_backend() -> (MockServer, BackendClient, ClientConfig) {
    let server = MockServer::start().await;
    let url = Url::parse(&server.uri()).expect("mock server URI is a valid URL");
    let config = ClientConfig::for_backend(url);
    let client = BackendClient::new(&config).expect("client builds");
    (server, client, config)
}

/// A polling policy fast enough for tests: 10ms ticks, 200ms terminal
/// timeout.
#[must_use]
pub fn fast_poll() -> PollPolicy {
    PollPolicy {
        interval: Duration::from_millis(10),
        warn_after: Duration::from_millis(50),
        timeout: Duration::from_millis(200),
    }
}

/// A `retrieve-user` body with no generation on record.
#[must_use]
pub fn pending_user(user_id: &str) -> serde_json::Value {
    json!({ "user_id": user_id, "generations_left": 3 })
}

/// A `retrieve-user` body carrying a completed generation.
#[must_use]
pub fn completed_user(user_id: &str, generation: serde_json::Value) -> serde_json::Value {
    json!({
        "user_id": user_id,
        "email": "user@example.com",
        "subscription_tier": "Basic",
        "generations_left": 2,
        "last_generation": generation,
    })
}
