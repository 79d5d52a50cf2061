use std::collections::HashMap;

use futures::future::try_join_all;
use thiserror::Error;
use tracing::{debug, info};

use crate::http::{HttpRequest, HttpResponse, Network, NetworkError};
use crate::manifest::Manifest;

use super::store::{CacheStore, StoredResponse};

/// Installation failed for one manifest entry, which fails the whole batch.
/// Surfaced to the hosting runtime, whose registration logic owns retry.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("failed to fetch {url} during cache install: {source}")]
    Fetch {
        url: String,
        #[source]
        source: NetworkError,
    },

    #[error("cache install fetch for {url} returned HTTP {status}")]
    BadStatus { url: String, status: u16 },
}

impl InstallError {
    /// The manifest URL that sank the install.
    pub fn url(&self) -> &str {
        match self {
            InstallError::Fetch { url, .. } => url,
            InstallError::BadStatus { url, .. } => url,
        }
    }
}

/// The offline cache controller for one generation.
///
/// The hosting runtime drives the lifecycle explicitly: it calls
/// [`install`](Self::install) once when the generation is introduced and is
/// expected to hold incoming requests until installation settles, then routes
/// every outgoing request through [`intercept`](Self::intercept). Introducing
/// a new generation means constructing a new controller; the old store is
/// orphaned and never read again.
pub struct CacheController<N: Network> {
    generation: String,
    manifest: Manifest,
    network: N,
    store: Option<CacheStore>,
}

impl<N: Network> CacheController<N> {
    pub fn new(generation: impl Into<String>, manifest: Manifest, network: N) -> Self {
        Self {
            generation: generation.into(),
            manifest,
            network,
            store: None,
        }
    }

    pub fn generation(&self) -> &str {
        &self.generation
    }

    pub fn is_installed(&self) -> bool {
        self.store.is_some()
    }

    /// The populated store, present only after a successful install.
    pub fn store(&self) -> Option<&CacheStore> {
        self.store.as_ref()
    }

    /// Fetch-and-store every manifest URL as one atomic batch.
    ///
    /// A transport error or non-2xx status for any single entry fails the
    /// whole install and commits no store: the controller stays uninstalled
    /// for this generation and the error propagates to the host. A second
    /// call after success is a no-op.
    pub async fn install(&mut self) -> Result<(), InstallError> {
        if self.store.is_some() {
            debug!(generation = %self.generation, "cache already installed");
            return Ok(());
        }

        let network = &self.network;
        let fetches = self.manifest.urls().iter().map(|url| async move {
            let request = HttpRequest::get(url.clone());
            let response = network
                .fetch(&request)
                .await
                .map_err(|source| InstallError::Fetch {
                    url: url.clone(),
                    source,
                })?;
            if !response.is_success() {
                return Err(InstallError::BadStatus {
                    url: url.clone(),
                    status: response.status,
                });
            }
            Ok((request.key(), StoredResponse::new(response)))
        });

        // try_join_all aborts on the first failure, so a partial batch never
        // reaches the store below.
        let entries: HashMap<_, _> = try_join_all(fetches).await?.into_iter().collect();

        info!(
            generation = %self.generation,
            assets = entries.len(),
            "offline cache installed"
        );
        self.store = Some(CacheStore::new(&self.generation, entries));
        Ok(())
    }

    /// Serve an intercepted request: stored response on a hit, otherwise the
    /// network's result unchanged, success or failure.
    ///
    /// Misses are not written back to the store; only the install-time
    /// manifest is ever served from cache. No retry happens here either way.
    pub async fn intercept(&self, request: &HttpRequest) -> Result<HttpResponse, NetworkError> {
        if let Some(stored) = self.store.as_ref().and_then(|s| s.lookup(request)) {
            debug!(url = %request.url, "serving from offline cache");
            return Ok(stored.response.clone());
        }

        debug!(url = %request.url, "cache miss, forwarding to network");
        self.network.fetch(request).await
    }
}
