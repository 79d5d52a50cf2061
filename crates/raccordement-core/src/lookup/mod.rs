//! Postal code lookup module.
//!
//! This module provides the [`LookupClient`] for resolving a user-entered
//! postal code to the commune names it covers, via the public geocoding API.
//! The default contract absorbs every failure into an empty result; callers
//! that need the distinction use `resolve_strict`.

pub mod client;
pub mod error;

pub use client::LookupClient;
pub use error::LookupError;
