//! Offline resilience core for the raccordement marketing site.
//!
//! Two independent components, composed only by the hosting runtime:
//!
//! - [`cache`]: the asset cache controller. Installed once per generation
//!   from a fixed manifest, then serves intercepted requests from its
//!   write-once store, falling back to the network without write-through.
//! - [`lookup`]: the postal lookup client. Resolves a 5-character postal
//!   code to commune names via the public geocoding API, absorbing all
//!   failures into an empty result.
//!
//! The browser-platform install and fetch hooks are reframed as explicit
//! methods ([`CacheController::install`] and [`CacheController::intercept`])
//! behind the [`http::Network`] seam, so the whole lifecycle is testable
//! without a live browser environment.

pub mod cache;
pub mod config;
pub mod http;
pub mod lookup;
pub mod manifest;
pub mod models;

pub use cache::{CacheController, CacheStore, InstallError};
pub use config::Config;
pub use http::{HttpNetwork, HttpRequest, HttpResponse, Network, NetworkError};
pub use lookup::{LookupClient, LookupError};
pub use manifest::{Manifest, CACHE_GENERATION};
