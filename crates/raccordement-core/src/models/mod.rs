//! Data models for remote service payloads.
//!
//! Currently just the commune record returned by the geocoding API.

pub mod commune;

pub use commune::Commune;
