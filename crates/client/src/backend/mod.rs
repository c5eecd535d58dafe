//! REST client for the generation backend.
//!
//! Three endpoints, all backend-owned shapes:
//!
//! - `POST /create-user` - new anonymous identity + session token
//! - `GET /retrieve-user` - current profile + last generation (token in the
//!   `auth-token` header)
//! - `POST /list-image` - submit a generation job; 201 means accepted, any
//!   other status is treated as transient overload

mod wire;

use std::sync::Arc;

use tracing::{debug, instrument};

use resell_core::User;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::session::{Session, SessionToken};

use wire::{ListImageRequest, UserEnvelope};

/// Header carrying the session token, named by the backend contract.
const AUTH_HEADER: &str = "auth-token";

/// How much of an error body to keep in logs and error messages.
const BODY_SNIPPET_LEN: usize = 200;

/// A generation job: the uploaded object's key, the brand selection, and the
/// rarity flag.
#[derive(Debug, Clone)]
pub struct ListingSubmission {
    object_key: String,
    brand: String,
    rare: bool,
}

impl ListingSubmission {
    /// Describe a generation job for [`BackendClient::submit_listing`].
    #[must_use]
    pub fn new(object_key: impl Into<String>, brand: impl Into<String>, rare: bool) -> Self {
        Self {
            object_key: object_key.into(),
            brand: brand.into(),
            rare,
        }
    }
}

/// Client for the Resell generation backend.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                http,
                base_url: config.backend_url.as_str().trim_end_matches('/').to_string(),
            }),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base_url)
    }

    /// Create a new anonymous user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the response cannot be parsed,
    /// or no session token is issued.
    #[instrument(skip(self))]
    pub async fn create_user(&self) -> Result<Session, ClientError> {
        let response = self
            .inner
            .http
            .post(self.endpoint("create-user"))
            .send()
            .await?;

        let (user, token) = parse_user_response(response).await?;
        let token = token.ok_or(ClientError::MissingToken)?;

        debug!(user_id = %user.user_id, "created anonymous user");
        Ok(Session {
            user,
            token,
            rotated: true,
        })
    }

    /// Fetch the user record for a session token.
    ///
    /// Returns the user and, when the backend rotated the session, the
    /// replacement token the caller must persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend rejects the token,
    /// or the response cannot be parsed.
    #[instrument(skip(self, token))]
    pub async fn retrieve_user(
        &self,
        token: &SessionToken,
    ) -> Result<(User, Option<SessionToken>), ClientError> {
        let response = self
            .inner
            .http
            .get(self.endpoint("retrieve-user"))
            .header(AUTH_HEADER, token.expose())
            .send()
            .await?;

        parse_user_response(response).await
    }

    /// Bootstrap a session: rehydrate from a stored token, or create a new
    /// anonymous user when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if either underlying request fails; the caller
    /// should surface a retry affordance rather than leaving the flow stuck.
    #[instrument(skip(self, stored))]
    pub async fn bootstrap(&self, stored: Option<SessionToken>) -> Result<Session, ClientError> {
        match stored {
            Some(token) => {
                let (user, rotated) = self.retrieve_user(&token).await?;
                let rotated_now = rotated.is_some();
                Ok(Session {
                    user,
                    token: rotated.unwrap_or(token),
                    rotated: rotated_now,
                })
            }
            None => self.create_user().await,
        }
    }

    /// Submit a generation job.
    ///
    /// An empty brand fails immediately with [`ClientError::BrandMissing`]
    /// and performs no network call. A non-201 response is transient
    /// overload, reported as [`ClientError::Overloaded`] with a retry
    /// suggestion attached via its advisory.
    ///
    /// # Errors
    ///
    /// Returns an error on missing brand, request failure, or a non-created
    /// response.
    #[instrument(skip(self, token, submission), fields(brand = %submission.brand))]
    pub async fn submit_listing(
        &self,
        token: &SessionToken,
        submission: &ListingSubmission,
    ) -> Result<(), ClientError> {
        if submission.brand.trim().is_empty() {
            return Err(ClientError::BrandMissing);
        }

        let body = ListImageRequest {
            url: &submission.object_key,
            is_unique: submission.rare,
            brand: &submission.brand,
        };

        let response = self
            .inner
            .http
            .post(self.endpoint("list-image"))
            .header(AUTH_HEADER, token.expose())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::CREATED {
            tracing::warn!(status = %status, "generation job not accepted");
            return Err(ClientError::Overloaded);
        }

        debug!("generation job accepted");
        Ok(())
    }
}

/// Decode a user-endpoint response, logging enough body to diagnose
/// malformed payloads.
async fn parse_user_response(
    response: reqwest::Response,
) -> Result<(User, Option<SessionToken>), ClientError> {
    let status = response.status();

    // Body as text first for better error diagnostics
    let body = response.text().await?;

    if !status.is_success() {
        tracing::error!(
            status = %status,
            body = %snippet(&body),
            "backend returned non-success status"
        );
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: snippet(&body),
        });
    }

    let envelope: UserEnvelope = match serde_json::from_str(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::error!(
                error = %e,
                body = %snippet(&body),
                "failed to parse user response"
            );
            return Err(ClientError::Parse(e));
        }
    };

    Ok(envelope.into_parts())
}

fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let inner = BackendClientInner {
            http: reqwest::Client::new(),
            base_url: "http://localhost:9000".to_string(),
        };
        let client = BackendClient {
            inner: Arc::new(inner),
        };

        assert_eq!(
            client.endpoint("retrieve-user"),
            "http://localhost:9000/retrieve-user"
        );
    }

    #[test]
    fn test_snippet_truncates() {
        let long = "x".repeat(1000);
        assert_eq!(snippet(&long).len(), BODY_SNIPPET_LEN);
        assert_eq!(snippet("short"), "short");
    }
}
