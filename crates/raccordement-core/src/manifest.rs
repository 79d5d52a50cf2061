//! The install-time asset manifest.
//!
//! A fixed, ordered list of site paths the cache controller populates during
//! installation. Entries are plain strings, never templated. Changing the
//! list requires bumping [`CACHE_GENERATION`] so the hosting runtime runs a
//! fresh install against the new store.

/// Current cache generation name. Stores from prior generations are orphaned
/// and never read.
pub const CACHE_GENERATION: &str = "raccordement-v1";

/// Site paths required to be available offline: the landing page, the script
/// bundle, the stylesheet, and the two hero images.
pub const ASSET_PATHS: [&str; 5] = [
    "/",
    "/js/app.js",
    "/css/style.css",
    "/img/logo.png",
    "/img/chantier.jpg",
];

/// The resolved manifest: absolute URLs to fetch-and-store as one atomic
/// batch during installation.
#[derive(Debug, Clone)]
pub struct Manifest {
    urls: Vec<String>,
}

impl Manifest {
    /// Join the fixed asset paths onto the site origin.
    pub fn for_origin(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        let urls = ASSET_PATHS
            .iter()
            .map(|path| format!("{}{}", origin, path))
            .collect();
        Self { urls }
    }

    /// A manifest from explicit URLs, for hosts that assemble their own list.
    pub fn from_urls(urls: Vec<String>) -> Self {
        Self { urls }
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_origin_joins_paths() {
        let manifest = Manifest::for_origin("https://raccordement.example");
        assert_eq!(manifest.urls()[0], "https://raccordement.example/");
        assert_eq!(manifest.urls()[1], "https://raccordement.example/js/app.js");
        assert_eq!(manifest.len(), ASSET_PATHS.len());
    }

    #[test]
    fn test_for_origin_trims_trailing_slash() {
        let manifest = Manifest::for_origin("https://raccordement.example/");
        assert_eq!(manifest.urls()[0], "https://raccordement.example/");
    }

    #[test]
    fn test_for_origin_preserves_order() {
        let manifest = Manifest::for_origin("http://localhost:8080");
        let expected: Vec<String> = ASSET_PATHS
            .iter()
            .map(|p| format!("http://localhost:8080{}", p))
            .collect();
        assert_eq!(manifest.urls(), expected.as_slice());
    }
}
