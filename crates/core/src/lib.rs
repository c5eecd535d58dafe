//! Resell Core - Shared types library.
//!
//! This crate provides common types used across all Resell client components:
//! - `client` - Backend API client, upload adapter, polling loop
//! - `cli` - Terminal front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no timers. This keeps it lightweight and allows the status
//! transition table to be tested in isolation from any rendering or network
//! layer.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs and emails, subscription tiers,
//!   users, and generation records
//! - [`flow`] - The UI status machine: a pure mapping from fetched state to
//!   exactly one rendered screen

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod flow;
pub mod types;

pub use flow::*;
pub use types::*;
