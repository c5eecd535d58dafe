//! The UI status machine.
//!
//! A single enumerated status drives which screen the front end renders; no
//! two screens are shown simultaneously. The transition rules are pure
//! functions of the fetched user and generation state, so the whole table
//! can be tested without any network or rendering layer. All effects
//! (requests, timers) live in `resell-client` and the front end.

use serde::{Deserialize, Serialize};

use crate::types::{Generation, RecordOutcome, User};

/// Which screen is rendered. The single source of truth for the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FlowStatus {
    /// The upload form: no generation in flight.
    #[default]
    Idle,
    /// A generation has been accepted and is being polled for.
    Generating,
    /// A result is ready but the user must sign in to view it.
    LoginRequired,
    /// A result is ready but the user is out of free generations.
    QuotaExceeded,
    /// The generated listing is displayed.
    ResultReady,
}

/// User-facing recovery messages. Each advisory returns the user to the
/// upload form with advice; none is retried automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Advisory {
    /// Submission attempted without a brand selection.
    BrandMissing,
    /// The backend rejected or failed the generation under load.
    Overloaded,
    /// The classifier could not recognize the photo as clothing.
    ImageQuality,
    /// The poll loop hit its terminal timeout without a result.
    TimedOut,
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BrandMissing => write!(f, "Please select a brand"),
            Self::Overloaded => write!(
                f,
                "Our AI model is a bit overloaded with requests right now. \
                 Wait about 30 seconds, and give it another shot!"
            ),
            Self::ImageQuality => write!(
                f,
                "Your picture does not show the clothing quite clearly enough. \
                 Make sure the lighting is good, and try taking a photo with a \
                 neutral background!"
            ),
            Self::TimedOut => write!(
                f,
                "Our backend did not come back with a result in time. \
                 Your generation may still complete; check back in a minute, \
                 or try again."
            ),
        }
    }
}

/// The outcome of classifying a completed generation against the user who
/// requested it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// The screen to render next.
    pub status: FlowStatus,
    /// Advice shown when the flow falls back to [`FlowStatus::Idle`].
    pub advisory: Option<Advisory>,
}

impl Resolution {
    const fn new(status: FlowStatus, advisory: Option<Advisory>) -> Self {
        Self { status, advisory }
    }
}

/// Whether the user has exhausted their generation allowance.
///
/// A counter at or below zero counts as exhausted unless the tier is
/// unlimited. An absent counter means the backend has not started tracking
/// this user yet, which is not exhaustion.
#[must_use]
pub fn quota_exhausted(user: &User) -> bool {
    user.generations_left.is_some_and(|left| left <= 0) && !user.tier().is_unlimited()
}

/// Map a completed generation record onto the next screen.
///
/// Transition table:
/// - record carries an error marker: back to the upload form with the
///   overload advisory, regardless of other fields;
/// - record says the photo is not clothing: back to the upload form with the
///   image-quality advisory;
/// - valid record, user not signed in: the result is gated behind login;
/// - valid record, signed in but out of generations on a non-unlimited
///   tier: the result is gated behind the quota screen;
/// - otherwise: show the result.
#[must_use]
pub fn resolve_generation(user: &User, generation: &Generation) -> Resolution {
    match generation.outcome() {
        RecordOutcome::Error => Resolution::new(FlowStatus::Idle, Some(Advisory::Overloaded)),
        RecordOutcome::NotClothing => {
            Resolution::new(FlowStatus::Idle, Some(Advisory::ImageQuality))
        }
        RecordOutcome::Valid => {
            if !user.is_signed_in() {
                Resolution::new(FlowStatus::LoginRequired, None)
            } else if quota_exhausted(user) {
                Resolution::new(FlowStatus::QuotaExceeded, None)
            } else {
                Resolution::new(FlowStatus::ResultReady, None)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Email, SubscriptionTier, UserId};
    use serde_json::json;

    fn user(
        email: Option<&str>,
        generations_left: Option<i64>,
        tier: Option<SubscriptionTier>,
    ) -> User {
        User {
            user_id: UserId::new("u-1"),
            email: email.map(|e| Email::parse(e).unwrap()),
            subscription_tier: tier,
            generations_left,
            last_generation: None,
            subscription_expires: None,
        }
    }

    fn generation(value: serde_json::Value) -> Generation {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_error_marker_always_returns_to_idle() {
        // Regardless of other fields, including a subscribed user.
        let u = user(Some("a@b.c"), Some(10), Some(SubscriptionTier::Plus));
        let g = generation(json!({ "error": true, "listing_title": "Tee" }));

        let resolution = resolve_generation(&u, &g);
        assert_eq!(resolution.status, FlowStatus::Idle);
        assert_eq!(resolution.advisory, Some(Advisory::Overloaded));
    }

    #[test]
    fn test_not_clothing_returns_to_idle_with_image_advice() {
        let u = user(Some("a@b.c"), Some(10), Some(SubscriptionTier::Plus));
        let g = generation(json!({ "is_clothing": false }));

        let resolution = resolve_generation(&u, &g);
        assert_eq!(resolution.status, FlowStatus::Idle);
        assert_eq!(resolution.advisory, Some(Advisory::ImageQuality));
    }

    #[test]
    fn test_valid_record_without_email_requires_login() {
        let u = user(None, Some(3), None);
        let g = generation(json!({ "listing_title": "Tee" }));

        let resolution = resolve_generation(&u, &g);
        assert_eq!(resolution.status, FlowStatus::LoginRequired);
        assert_eq!(resolution.advisory, None);
    }

    #[test]
    fn test_exhausted_basic_tier_hits_quota_screen() {
        let u = user(Some("a@b.c"), Some(0), Some(SubscriptionTier::Basic));
        let g = generation(json!({ "listing_title": "Tee" }));

        let resolution = resolve_generation(&u, &g);
        assert_eq!(resolution.status, FlowStatus::QuotaExceeded);
    }

    #[test]
    fn test_exhausted_plus_tier_still_sees_result() {
        let u = user(Some("a@b.c"), Some(0), Some(SubscriptionTier::Plus));
        let g = generation(json!({ "listing_title": "Tee" }));

        let resolution = resolve_generation(&u, &g);
        assert_eq!(resolution.status, FlowStatus::ResultReady);
    }

    #[test]
    fn test_remaining_generations_see_result() {
        let u = user(Some("a@b.c"), Some(2), Some(SubscriptionTier::Basic));
        let g = generation(json!({ "listing_title": "Tee" }));

        let resolution = resolve_generation(&u, &g);
        assert_eq!(resolution.status, FlowStatus::ResultReady);
    }

    #[test]
    fn test_zero_counter_counts_as_exhausted() {
        // The original UI's truthiness check let a counter of exactly 0 slip
        // through to the result screen; 0 must gate.
        assert!(quota_exhausted(&user(Some("a@b.c"), Some(0), None)));
        assert!(quota_exhausted(&user(
            Some("a@b.c"),
            Some(-1),
            Some(SubscriptionTier::Basic)
        )));
        assert!(!quota_exhausted(&user(Some("a@b.c"), None, None)));
        assert!(!quota_exhausted(&user(
            Some("a@b.c"),
            Some(0),
            Some(SubscriptionTier::Plus)
        )));
    }

    #[test]
    fn test_default_status_is_idle() {
        assert_eq!(FlowStatus::default(), FlowStatus::Idle);
    }
}
