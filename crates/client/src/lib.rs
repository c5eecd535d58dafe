//! Resell backend API client.
//!
//! # Architecture
//!
//! - [`backend`] - REST client for the generation backend (`create-user`,
//!   `retrieve-user`, `list-image`)
//! - [`session`] - Explicit session-token abstraction injected into the
//!   request layer; the caller owns persistence
//! - [`upload`] - Thin adapter that names and PUTs photos into object
//!   storage under the agreed `upload-{userId}.{ext}` key pattern
//! - [`poll`] - Bounded fixed-interval polling for generation completion,
//!   with a terminal timeout instead of the original unbounded loop
//! - [`config`] - Environment-driven configuration
//!
//! All request/response shapes live in wire structs and are converted to the
//! domain types in `resell-core`; classification of a completed generation
//! is left to `resell_core::flow` so it stays pure and testable.
//!
//! # Example
//!
//! ```rust,ignore
//! use resell_client::{BackendClient, ClientConfig, ListingSubmission, poll};
//!
//! let config = ClientConfig::from_env()?;
//! let client = BackendClient::new(&config)?;
//!
//! let session = client.bootstrap(stored_token).await?;
//! client
//!     .submit_listing(&session.token, &ListingSubmission::new(key, "Nike", false))
//!     .await?;
//! let (user, generation) =
//!     poll::await_generation(&client, &session.token, &config.poll, |_| {}).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod error;
pub mod poll;
pub mod session;
pub mod upload;

pub use backend::{BackendClient, ListingSubmission};
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use poll::{PollPolicy, PollProgress};
pub use session::{Session, SessionToken};
pub use upload::StorageClient;
