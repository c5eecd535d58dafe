//! The backend-held user record as seen by the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Email, Generation, SubscriptionTier, UserId};

/// A user profile, created or fetched on bootstrap.
///
/// Anonymous users carry only an identifier and a free-generation counter;
/// login adds the email and tier, and each completed generation updates the
/// counter and the last-generation record. The client never deletes a user;
/// losing the session token is the only removal path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Opaque backend-assigned identifier.
    pub user_id: UserId,

    /// Set once the user has signed in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,

    /// Set once the user has subscribed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_tier: Option<SubscriptionTier>,

    /// Remaining generations in the current allowance. Absent for brand-new
    /// users, who get the default free allowance server-side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generations_left: Option<i64>,

    /// The most recent generation, if one has completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_generation: Option<Generation>,

    /// When the current subscription period ends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_expires: Option<DateTime<Utc>>,
}

impl User {
    /// Whether the user has signed in (has a verified email on record).
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.email.is_some()
    }

    /// The user's effective tier; users without a subscription are `Free`.
    #[must_use]
    pub fn tier(&self) -> SubscriptionTier {
        self.subscription_tier.unwrap_or_default()
    }
}
