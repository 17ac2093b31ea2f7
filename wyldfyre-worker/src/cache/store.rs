//! Cache store lifecycle: install precaching, activate-time purge, and
//! entry-level access for the request router.

use std::sync::Arc;

use tracing::{debug, info, warn};
use wyldfyre_core::{CacheError, RequestSnapshot, ResponseSnapshot, WorkerConfig, WyldResult};

use super::traits::CacheBackend;
use crate::fetcher::NetworkFetcher;

/// Versioned cache store bound to one worker configuration.
///
/// All reads and writes go to the current generation's namespace. Old
/// generations are only ever touched by [`CacheStore::activate`], which
/// deletes them wholesale.
pub struct CacheStore<B: CacheBackend> {
    backend: Arc<B>,
    config: WorkerConfig,
}

impl<B: CacheBackend> CacheStore<B> {
    pub fn new(backend: Arc<B>, config: WorkerConfig) -> Self {
        Self { backend, config }
    }

    /// The namespace all current reads and writes target.
    pub fn cache_name(&self) -> String {
        self.config.cache_name()
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Install-time precaching.
    ///
    /// Every essential asset must fetch with a 200 and be stored, or the
    /// whole install fails and the error propagates - the browser retries
    /// installation on the next page load. Optional assets (platform splash
    /// images) are fetched best-effort; individual failures are logged and
    /// swallowed.
    pub async fn install<F: NetworkFetcher>(&self, fetcher: &F) -> WyldResult<()> {
        let namespace = self.cache_name();
        info!(cache = %namespace, assets = self.config.essential_assets.len(), "Precaching essential assets");

        for url in &self.config.essential_assets {
            let response = fetcher
                .fetch(&RequestSnapshot::get(url.clone()))
                .await
                .map_err(|e| CacheError::InstallFailed {
                    url: url.clone(),
                    reason: e.to_string(),
                })?;
            if !response.is_cacheable() {
                return Err(CacheError::InstallFailed {
                    url: url.clone(),
                    reason: format!("unexpected status {}", response.status),
                }
                .into());
            }
            self.backend.put(&namespace, url, response).await?;
        }

        for url in &self.config.optional_assets {
            match fetcher.fetch(&RequestSnapshot::get(url.clone())).await {
                Ok(response) if response.is_cacheable() => {
                    if let Err(e) = self.backend.put(&namespace, url, response).await {
                        warn!(url = %url, error = %e, "Optional asset cache write failed");
                    }
                }
                Ok(response) => {
                    warn!(url = %url, status = response.status, "Optional asset fetch returned non-200");
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "Optional asset fetch failed");
                }
            }
        }

        Ok(())
    }

    /// Activate-time cleanup: delete every namespace that carries the
    /// product prefix but is not the current generation. Returns how many
    /// stale generations were purged.
    pub async fn activate(&self) -> WyldResult<usize> {
        let mut purged = 0;
        for namespace in self.backend.list_namespaces().await? {
            if self.config.is_stale_namespace(&namespace) {
                if self.backend.delete_namespace(&namespace).await? {
                    info!(cache = %namespace, "Purged stale cache generation");
                    purged += 1;
                }
            }
        }
        Ok(purged)
    }

    /// Best-effort bulk population (`CACHE_URLS` message). Per-URL failures
    /// are logged and swallowed; the call itself never fails.
    pub async fn cache_urls<F: NetworkFetcher>(&self, fetcher: &F, urls: &[String]) {
        let namespace = self.cache_name();
        for url in urls {
            match fetcher.fetch(&RequestSnapshot::get(url.clone())).await {
                Ok(response) if response.is_cacheable() => {
                    if let Err(e) = self.backend.put(&namespace, url, response).await {
                        debug!(url = %url, error = %e, "cache_urls write failed");
                    }
                }
                Ok(response) => {
                    debug!(url = %url, status = response.status, "cache_urls skipped non-200");
                }
                Err(e) => {
                    debug!(url = %url, error = %e, "cache_urls fetch failed");
                }
            }
        }
    }

    /// Delete the entire current-generation namespace (`CLEAR_CACHE`).
    pub async fn clear(&self) -> WyldResult<()> {
        self.backend.delete_namespace(&self.cache_name()).await?;
        Ok(())
    }

    /// Look up a response for a request URL in the current generation.
    pub async fn match_request(&self, url: &str) -> WyldResult<Option<ResponseSnapshot>> {
        self.backend.get(&self.cache_name(), url).await
    }

    /// Store a response under a request URL in the current generation.
    pub async fn put_response(&self, url: &str, response: ResponseSnapshot) -> WyldResult<()> {
        self.backend.put(&self.cache_name(), url, response).await
    }
}

impl<B: CacheBackend> Clone for CacheStore<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCacheBackend;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use wyldfyre_core::RouteError;

    /// Scripted fetcher: URL -> response, anything else is a network error.
    struct ScriptedFetcher {
        responses: HashMap<String, ResponseSnapshot>,
    }

    impl ScriptedFetcher {
        fn new(entries: Vec<(&str, ResponseSnapshot)>) -> Self {
            Self {
                responses: entries
                    .into_iter()
                    .map(|(url, resp)| (url.to_string(), resp))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl NetworkFetcher for ScriptedFetcher {
        async fn fetch(&self, request: &RequestSnapshot) -> Result<ResponseSnapshot, RouteError> {
            self.responses
                .get(&request.url)
                .cloned()
                .ok_or_else(|| RouteError::FetchFailed {
                    url: request.url.clone(),
                    reason: "connection refused".to_string(),
                })
        }
    }

    fn test_config() -> WorkerConfig {
        let mut config = WorkerConfig::for_generation("v2");
        config.essential_assets = vec!["/".to_string(), "/offline.html".to_string()];
        config.optional_assets = vec!["/splash/ios.png".to_string()];
        config
    }

    #[tokio::test]
    async fn test_install_precaches_essentials() {
        let backend = Arc::new(MemoryCacheBackend::new());
        let store = CacheStore::new(Arc::clone(&backend), test_config());
        let fetcher = ScriptedFetcher::new(vec![
            ("/", ResponseSnapshot::ok(b"root".to_vec())),
            ("/offline.html", ResponseSnapshot::ok(b"offline".to_vec())),
            ("/splash/ios.png", ResponseSnapshot::ok(b"png".to_vec())),
        ]);

        store.install(&fetcher).await.unwrap();

        assert_eq!(backend.namespace_len("wyld-fyre-v2").await, 3);
    }

    #[tokio::test]
    async fn test_install_fails_on_missing_essential() {
        let store = CacheStore::new(Arc::new(MemoryCacheBackend::new()), test_config());
        let fetcher = ScriptedFetcher::new(vec![("/", ResponseSnapshot::ok(vec![]))]);

        let err = store.install(&fetcher).await.unwrap_err();
        assert!(err.to_string().contains("/offline.html"));
    }

    #[tokio::test]
    async fn test_install_fails_on_non_200_essential() {
        let store = CacheStore::new(Arc::new(MemoryCacheBackend::new()), test_config());
        let fetcher = ScriptedFetcher::new(vec![
            ("/", ResponseSnapshot::ok(vec![])),
            (
                "/offline.html",
                ResponseSnapshot {
                    status: 500,
                    headers: vec![],
                    body: vec![],
                },
            ),
        ]);

        assert!(store.install(&fetcher).await.is_err());
    }

    #[tokio::test]
    async fn test_install_swallows_optional_failures() {
        let backend = Arc::new(MemoryCacheBackend::new());
        let store = CacheStore::new(Arc::clone(&backend), test_config());
        // Optional splash asset absent from the script entirely.
        let fetcher = ScriptedFetcher::new(vec![
            ("/", ResponseSnapshot::ok(vec![])),
            ("/offline.html", ResponseSnapshot::ok(vec![])),
        ]);

        store.install(&fetcher).await.unwrap();
        assert_eq!(backend.namespace_len("wyld-fyre-v2").await, 2);
    }

    #[tokio::test]
    async fn test_activate_purges_only_stale_product_generations() {
        let backend = Arc::new(MemoryCacheBackend::new());
        for ns in ["wyld-fyre-v1", "wyld-fyre-v2", "other-app-v9"] {
            backend
                .put(ns, "/", ResponseSnapshot::ok(vec![]))
                .await
                .unwrap();
        }
        let store = CacheStore::new(Arc::clone(&backend), test_config());

        let purged = store.activate().await.unwrap();

        assert_eq!(purged, 1);
        let remaining = backend.list_namespaces().await.unwrap();
        assert_eq!(remaining, vec!["other-app-v9", "wyld-fyre-v2"]);
    }

    #[tokio::test]
    async fn test_cache_urls_is_best_effort() {
        let backend = Arc::new(MemoryCacheBackend::new());
        let store = CacheStore::new(Arc::clone(&backend), test_config());
        let fetcher = ScriptedFetcher::new(vec![("/docs", ResponseSnapshot::ok(vec![]))]);

        store
            .cache_urls(
                &fetcher,
                &["/docs".to_string(), "/unreachable".to_string()],
            )
            .await;

        assert_eq!(backend.namespace_len("wyld-fyre-v2").await, 1);
    }

    #[tokio::test]
    async fn test_clear_removes_current_generation() {
        let backend = Arc::new(MemoryCacheBackend::new());
        let store = CacheStore::new(Arc::clone(&backend), test_config());
        store
            .put_response("/a", ResponseSnapshot::ok(vec![]))
            .await
            .unwrap();

        store.clear().await.unwrap();
        assert_eq!(backend.namespace_len("wyld-fyre-v2").await, 0);
    }
}
