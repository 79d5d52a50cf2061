//! Client for the commune geocoding API.
//!
//! A single GET per lookup, no retry, no caching. Everything the client
//! learns lives for one request/response cycle.

use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use tracing::debug;

use crate::models::Commune;

use super::LookupError;

/// Base URL for the public geocoding API.
pub const LOOKUP_BASE_URL: &str = "https://geo.api.gouv.fr";

/// Lookup request timeout in seconds.
/// Suggestions are interactive; 10s is already generous.
pub const LOOKUP_TIMEOUT_SECS: u64 = 10;

/// Required postal code length.
const POSTAL_CODE_LEN: usize = 5;

/// Stateless lookup client.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct LookupClient {
    client: Client,
    base_url: String,
}

impl LookupClient {
    /// Client against the public geocoding API with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_options(LOOKUP_BASE_URL, Duration::from_secs(LOOKUP_TIMEOUT_SECS))
    }

    /// Client with an explicit base URL and timeout, for configuration
    /// overrides and tests.
    pub fn with_options(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a postal code to commune names, in the order the service
    /// returned them, duplicates included.
    ///
    /// This is the caller contract for the suggestion form: every failure
    /// (bad input, network, HTTP status, body shape) converges on an empty
    /// vec, logged at debug for diagnostics only. A caller cannot tell "no
    /// communes" apart from "lookup failed" here; use
    /// [`resolve_strict`](Self::resolve_strict) for that.
    pub async fn resolve(&self, postal_code: &str) -> Vec<String> {
        match self.resolve_strict(postal_code).await {
            Ok(names) => names,
            Err(e) => {
                debug!(error = %e, "postal lookup failed, returning no suggestions");
                Vec::new()
            }
        }
    }

    /// Resolve a postal code, surfacing the failure reason.
    pub async fn resolve_strict(&self, postal_code: &str) -> Result<Vec<String>, LookupError> {
        let length = postal_code.chars().count();
        if length != POSTAL_CODE_LEN {
            // No network call for malformed input
            return Err(LookupError::InvalidCode { length });
        }

        let url = format!("{}/communes", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("codePostal", postal_code),
                ("fields", "nom"),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status { status });
        }

        let body = response.text().await?;
        let communes: Vec<Commune> = serde_json::from_str(&body)?;

        Ok(communes.into_iter().map(|c| c.name).collect())
    }
}
