//! Subscription tier for generation quota gating.

use serde::{Deserialize, Serialize};

/// A user's subscription tier.
///
/// Wire values are the capitalized strings the backend sends
/// (`"Basic"`, `"Plus"`). Anonymous and signed-in-but-unsubscribed users
/// are `Free`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SubscriptionTier {
    /// No subscription; limited to the free generation allowance.
    #[default]
    Free,
    /// Paid tier with a per-period generation allowance.
    Basic,
    /// Paid tier with unlimited generations.
    Plus,
}

impl SubscriptionTier {
    /// Whether this tier is exempt from the remaining-generations quota.
    #[must_use]
    pub const fn is_unlimited(self) -> bool {
        matches!(self, Self::Plus)
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Free => write!(f, "Free"),
            Self::Basic => write!(f, "Basic"),
            Self::Plus => write!(f, "Plus"),
        }
    }
}

impl std::str::FromStr for SubscriptionTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Free" => Ok(Self::Free),
            "Basic" => Ok(Self::Basic),
            "Plus" => Ok(Self::Plus),
            _ => Err(format!("invalid subscription tier: {s}")),
        }
    }
}
