//! HTTP request/response descriptors and the network seam.
//!
//! The hosting runtime hands the cache controller every outgoing request and
//! expects a response back. That hand-off is modeled here as the `Network`
//! trait so the controller can be driven by the real `reqwest`-backed
//! implementation in production and by a mock server in tests.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

/// HTTP request timeout in seconds.
/// 30s allows for slow asset fetches while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Identity of a request for cache matching: method plus exact URL.
/// Query strings participate in the match; headers and body do not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    pub method: String,
    pub url: String,
}

/// An outgoing request descriptor as handed over by the hosting runtime.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// A plain GET request for a URL, the shape used for all manifest fetches.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn key(&self) -> RequestKey {
        RequestKey {
            method: self.method.clone(),
            url: self.url.clone(),
        }
    }
}

/// A response, whether freshly fetched from the network or replayed from the
/// cache store.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, replacing invalid sequences. Diagnostic use only.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("network request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// The network as seen by the cache controller.
///
/// Implemented by [`HttpNetwork`] in production; tests substitute a mock
/// server behind the same trait. A failed fetch is reported as-is; callers
/// above this seam never retry.
#[async_trait]
pub trait Network: Send + Sync {
    async fn fetch(&self, request: &HttpRequest) -> Result<HttpResponse, NetworkError>;
}

/// Production network backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpNetwork {
    client: Client,
}

impl HttpNetwork {
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Build a backend with an explicit request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Network for HttpNetwork {
    async fn fetch(&self, request: &HttpRequest) -> Result<HttpResponse, NetworkError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|_| NetworkError::InvalidRequest(format!("bad method: {}", request.method)))?;

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(ref body) = request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        debug!(url = %request.url, status, "network fetch completed");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_key_includes_query_string() {
        let plain = HttpRequest::get("https://example.org/js/app.js");
        let versioned = HttpRequest::get("https://example.org/js/app.js?v=2");
        assert_ne!(plain.key(), versioned.key());
    }

    #[test]
    fn test_request_key_distinguishes_method() {
        let get = HttpRequest::get("https://example.org/");
        let mut post = HttpRequest::get("https://example.org/");
        post.method = "POST".to_string();
        assert_ne!(get.key(), post.key());
    }

    #[test]
    fn test_response_success_range() {
        let mut response = HttpResponse {
            status: 204,
            headers: Vec::new(),
            body: Vec::new(),
        };
        assert!(response.is_success());
        response.status = 304;
        assert!(!response.is_success());
        response.status = 500;
        assert!(!response.is_success());
    }
}
