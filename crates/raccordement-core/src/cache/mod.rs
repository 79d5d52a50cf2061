//! Offline asset cache module.
//!
//! This module provides the [`CacheStore`] (a generation-named, write-once
//! map from request identity to stored response) and the [`CacheController`]
//! driving it through its install/serve lifecycle:
//!
//! - `install()` populates the store from the asset manifest as one atomic
//!   batch; any failed fetch fails the whole install and commits nothing.
//! - `intercept()` serves a stored response on a cache hit and forwards to
//!   the network otherwise, never writing the result back.

pub mod controller;
pub mod store;

pub use controller::{CacheController, InstallError};
pub use store::{CacheStore, StoredResponse};
