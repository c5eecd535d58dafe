//! Core types for the Resell client.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod generation;
pub mod id;
pub mod tier;
pub mod user;

pub use email::{Email, EmailError};
pub use generation::{FieldValue, Generation, RecordOutcome};
pub use id::UserId;
pub use tier::SubscriptionTier;
pub use user::User;
