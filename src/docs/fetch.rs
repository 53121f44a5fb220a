//! Cached retrieval of raw documentation pages.
//!
//! Pages are cached on disk keyed by a sanitized URL-derived filename, with
//! no expiry: source documentation changes infrequently relative to server
//! lifetime, so entries live until the cache directory is cleaned externally.
//! The check-then-write sequence is not atomic; concurrent fetches of the
//! same uncached URL may both hit the network and both write (last writer
//! wins). The cache is an optimization, not a consistency mechanism.

use std::path::PathBuf;
use std::time::Duration;

use tokio::fs;
use url::Url;

use crate::config::Config;
use crate::error::{AppError, Result};

/// Descriptive user-agent sent with every upstream request.
const USER_AGENT: &str = concat!("kubedoc/", env!("CARGO_PKG_VERSION"));

/// HTTP fetcher restricted to the configured documentation host, with a
/// transparent file cache.
pub struct DocFetcher {
    client: reqwest::Client,
    allowed_host: String,
    cache_dir: PathBuf,
    cache_enabled: bool,
}

impl DocFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let base = Url::parse(&config.docs_base_url).map_err(|e| {
            AppError::InvalidArgument(format!(
                "invalid documentation base URL '{}': {e}",
                config.docs_base_url
            ))
        })?;
        let allowed_host = base
            .host_str()
            .ok_or_else(|| {
                AppError::InvalidArgument(format!(
                    "documentation base URL '{}' has no host",
                    config.docs_base_url
                ))
            })?
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            allowed_host,
            cache_dir: config.cache_dir.clone(),
            cache_enabled: config.cache_enabled,
        })
    }

    /// Host that URLs must belong to.
    pub fn host(&self) -> &str {
        &self.allowed_host
    }

    /// Fetch raw content for `url`, serving from cache when possible.
    ///
    /// Note the side effect: a cache miss writes a file as part of a read
    /// operation. Read-only deployments must disable caching.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url).map_err(|_| self.invalid_domain(url))?;
        if parsed.host_str() != Some(self.allowed_host.as_str()) {
            return Err(self.invalid_domain(url));
        }

        let cache_path = self.cache_path(url);

        if self.cache_enabled {
            // No staleness check: a hit is served as-is.
            if let Ok(cached) = fs::read_to_string(&cache_path).await {
                tracing::info!(url, "Using cached content");
                metrics::counter!("docs_cache_hits_total").increment(1);
                return Ok(cached);
            }
        }

        tracing::info!(url, "Fetching content");
        metrics::counter!("docs_cache_misses_total").increment(1);

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;

        if self.cache_enabled {
            fs::create_dir_all(&self.cache_dir).await.map_err(|e| {
                AppError::FetchError(format!(
                    "failed to create cache directory {}: {e}",
                    self.cache_dir.display()
                ))
            })?;
            fs::write(&cache_path, &body).await.map_err(|e| {
                AppError::FetchError(format!(
                    "failed to write cache file {}: {e}",
                    cache_path.display()
                ))
            })?;
        }

        Ok(body)
    }

    /// Cache file for a URL: every non-word character replaced by an
    /// underscore, plus a fixed extension.
    pub fn cache_path(&self, url: &str) -> PathBuf {
        let sanitized: String = url
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        self.cache_dir.join(format!("{sanitized}.html"))
    }

    fn invalid_domain(&self, url: &str) -> AppError {
        AppError::InvalidDomain {
            host: self.allowed_host.clone(),
            url: url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn test_fetcher(base_url: &str, cache_dir: &Path, cache_enabled: bool) -> DocFetcher {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            docs_base_url: base_url.to_string(),
            cache_dir: cache_dir.to_path_buf(),
            cache_enabled,
            fetch_timeout_secs: 5,
            shutdown_timeout_secs: 1,
            auth_enabled: false,
            api_key: None,
            allowed_origins: "*".to_string(),
        };
        DocFetcher::new(&config).expect("fetcher config")
    }

    #[test]
    fn test_cache_path_sanitizes_url() {
        let dir = tempdir().unwrap();
        let fetcher = test_fetcher("https://kubernetes.io", dir.path(), true);

        let path = fetcher.cache_path("https://kubernetes.io/docs/concepts/");
        let name = path.file_name().unwrap().to_str().unwrap();

        assert_eq!(name, "https___kubernetes_io_docs_concepts_.html");
    }

    #[tokio::test]
    async fn test_rejects_foreign_host_before_network() {
        let dir = tempdir().unwrap();
        let fetcher = test_fetcher("https://kubernetes.io", dir.path(), true);

        let result = fetcher.fetch("https://evil.io/docs/x").await;

        match result {
            Err(AppError::InvalidDomain { host, url }) => {
                assert_eq!(host, "kubernetes.io");
                assert_eq!(url, "https://evil.io/docs/x");
            }
            other => panic!("expected InvalidDomain, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rejects_unparsable_url() {
        let dir = tempdir().unwrap();
        let fetcher = test_fetcher("https://kubernetes.io", dir.path(), true);

        let result = fetcher.fetch("not a url").await;
        assert!(matches!(result, Err(AppError::InvalidDomain { .. })));
    }

    #[tokio::test]
    async fn test_second_fetch_served_from_cache() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/docs/pods/")
            .with_status(200)
            .with_body("<html>pods</html>")
            .expect(1)
            .create_async()
            .await;

        let dir = tempdir().unwrap();
        let fetcher = test_fetcher(&server.url(), dir.path(), true);
        let url = format!("{}/docs/pods/", server.url());

        let first = fetcher.fetch(&url).await.unwrap();
        let second = fetcher.fetch(&url).await.unwrap();

        assert_eq!(first, "<html>pods</html>");
        assert_eq!(first, second);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_disabled_cache_fetches_every_time() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/docs/pods/")
            .with_status(200)
            .with_body("<html>pods</html>")
            .expect(2)
            .create_async()
            .await;

        let dir = tempdir().unwrap();
        let fetcher = test_fetcher(&server.url(), dir.path(), false);
        let url = format!("{}/docs/pods/", server.url());

        fetcher.fetch(&url).await.unwrap();
        fetcher.fetch(&url).await.unwrap();

        mock.assert_async().await;
        assert!(!fetcher.cache_path(&url).exists());
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/docs/missing/")
            .with_status(404)
            .create_async()
            .await;

        let dir = tempdir().unwrap();
        let fetcher = test_fetcher(&server.url(), dir.path(), true);
        let url = format!("{}/docs/missing/", server.url());

        let result = fetcher.fetch(&url).await;
        assert!(matches!(result, Err(AppError::FetchError(_))));
        // Failed fetches must not populate the cache.
        assert!(!fetcher.cache_path(&url).exists());
    }
}
