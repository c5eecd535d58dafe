//! Wire shapes for the generation backend.
//!
//! Kept separate from the domain types in `resell-core`; responses are
//! converted with explicit helpers rather than deserialized straight into
//! domain structs, because the user payload piggybacks session-token
//! rotation on the same body.

use serde::{Deserialize, Serialize};

use resell_core::User;

use crate::session::SessionToken;

/// Body of both `POST /create-user` and `GET /retrieve-user` responses: the
/// user record, plus an optional replacement session token.
#[derive(Debug, Deserialize)]
pub struct UserEnvelope {
    #[serde(flatten)]
    user: User,
    /// Replacement session token, when the backend rotates it. The name is
    /// a holdover from the cookie-based browser client.
    #[serde(default)]
    cookie: Option<String>,
}

impl UserEnvelope {
    /// Split the envelope into the user record and any rotated token.
    pub fn into_parts(self) -> (User, Option<SessionToken>) {
        let token = self.cookie.map(SessionToken::new);
        (self.user, token)
    }
}

/// Body of `POST /list-image`.
#[derive(Debug, Serialize)]
pub struct ListImageRequest<'a> {
    /// Object key of the uploaded photo.
    pub url: &'a str,
    /// Rarity flag: the user marked the item as rare/unique, which steers
    /// the pricing model.
    pub is_unique: bool,
    /// Brand selection; required, validated before submission.
    pub brand: &'a str,
}
