use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::http::{HttpRequest, HttpResponse, RequestKey};

/// A response captured at install time, stamped for diagnostics.
#[derive(Debug, Clone)]
pub struct StoredResponse {
    pub response: HttpResponse,
    pub stored_at: DateTime<Utc>,
}

impl StoredResponse {
    pub fn new(response: HttpResponse) -> Self {
        Self {
            response,
            stored_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        let now = Utc::now();
        (now - self.stored_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Covers clock skew (negative ages) too
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }
}

/// The authoritative store for one cache generation.
///
/// Built in one shot by [`CacheController::install`] and read-only afterward:
/// concurrent lookups need no locking because nothing mutates the entries.
/// A store for a superseded generation is simply never read again;
/// destruction is left to the hosting platform.
///
/// [`CacheController::install`]: crate::cache::CacheController::install
#[derive(Debug)]
pub struct CacheStore {
    generation: String,
    entries: HashMap<RequestKey, StoredResponse>,
    installed_at: DateTime<Utc>,
}

impl CacheStore {
    pub fn new(generation: impl Into<String>, entries: HashMap<RequestKey, StoredResponse>) -> Self {
        Self {
            generation: generation.into(),
            entries,
            installed_at: Utc::now(),
        }
    }

    pub fn generation(&self) -> &str {
        &self.generation
    }

    pub fn installed_at(&self) -> DateTime<Utc> {
        self.installed_at
    }

    /// Look up a stored response by the request's identity (method + exact
    /// URL). No partial or prefix matching.
    pub fn lookup(&self, request: &HttpRequest) -> Option<&StoredResponse> {
        self.entries.get(&request.key())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn stored(body: &str) -> StoredResponse {
        StoredResponse::new(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        })
    }

    #[test]
    fn test_lookup_exact_url_match_only() {
        let request = HttpRequest::get("https://example.org/js/app.js");
        let mut entries = HashMap::new();
        entries.insert(request.key(), stored("bundle"));
        let store = CacheStore::new("raccordement-v1", entries);

        assert!(store.lookup(&request).is_some());
        assert!(store
            .lookup(&HttpRequest::get("https://example.org/js/app.js?v=2"))
            .is_none());
        assert!(store
            .lookup(&HttpRequest::get("https://example.org/js/"))
            .is_none());
    }

    #[test]
    fn test_lookup_distinguishes_method() {
        let get = HttpRequest::get("https://example.org/");
        let mut entries = HashMap::new();
        entries.insert(get.key(), stored("home"));
        let store = CacheStore::new("raccordement-v1", entries);

        let mut head = HttpRequest::get("https://example.org/");
        head.method = "HEAD".to_string();
        assert!(store.lookup(&get).is_some());
        assert!(store.lookup(&head).is_none());
    }

    #[test]
    fn test_stored_response_age_display() {
        let fresh = stored("x");
        assert_eq!(fresh.age_display(), "just now");

        let mut old = stored("x");
        old.stored_at = Utc::now() - Duration::minutes(90);
        assert_eq!(old.age_display(), "1h ago");
    }

    #[test]
    fn test_store_reports_generation() {
        let store = CacheStore::new("raccordement-v2", HashMap::new());
        assert_eq!(store.generation(), "raccordement-v2");
        assert!(store.is_empty());
    }
}
