//! Network-first fetch handling with write-through caching and the
//! offline fallback chain.

use tracing::{debug, warn};
use wyldfyre_core::{RequestSnapshot, ResponseSnapshot, WorkerConfig, WyldResult};

use crate::cache::{CacheBackend, CacheStore};
use crate::fetcher::NetworkFetcher;

/// Fetch from the network, caching successes and falling back to the cache
/// (then the offline page, then a synthesized 503) when the network fails.
///
/// The write-through put is spawned and not awaited: the page gets its
/// response at network latency, and a cache write lost to worker shutdown
/// costs only a future fallback, never correctness.
pub(crate) async fn network_first<B, F>(
    request: &RequestSnapshot,
    store: &CacheStore<B>,
    fetcher: &F,
    config: &WorkerConfig,
) -> WyldResult<ResponseSnapshot>
where
    B: CacheBackend + 'static,
    F: NetworkFetcher,
{
    match fetcher.fetch(request).await {
        Ok(response) if response.is_cacheable() => {
            let store = store.clone();
            let url = request.url.clone();
            let snapshot = response.clone();
            tokio::spawn(async move {
                if let Err(e) = store.put_response(&url, snapshot).await {
                    warn!(url = %url, error = %e, "Write-through cache put failed");
                }
            });
            Ok(response)
        }
        // Non-200 responses are returned as-is and never cached.
        Ok(response) => Ok(response),
        Err(e) => {
            debug!(url = %request.url, error = %e, "Network fetch failed, trying cache");
            fallback(request, store, config).await
        }
    }
}

async fn fallback<B: CacheBackend>(
    request: &RequestSnapshot,
    store: &CacheStore<B>,
    config: &WorkerConfig,
) -> WyldResult<ResponseSnapshot> {
    if let Some(cached) = store.match_request(&request.url).await? {
        return Ok(cached);
    }

    if request.is_navigation {
        if let Some(offline) = store.match_request(&config.offline_url).await? {
            return Ok(offline);
        }
        if let Some(root) = store.match_request(&config.root_url).await? {
            return Ok(root);
        }
    }

    Ok(ResponseSnapshot::service_unavailable())
}
