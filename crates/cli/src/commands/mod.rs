//! CLI command implementations.

pub mod account;
pub mod generate;
pub mod logout;
