//! In-memory cache backend.
//!
//! The default backend for hosts without a durable cache surface, and the
//! test double for everything above the [`CacheBackend`] seam.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use wyldfyre_core::{ResponseSnapshot, WyldResult};

use super::traits::{CacheBackend, CacheStats};

#[derive(Default)]
struct Inner {
    namespaces: HashMap<String, HashMap<String, ResponseSnapshot>>,
    hits: u64,
    misses: u64,
}

/// Thread-safe in-memory cache keyed by namespace, then URL.
#[derive(Default)]
pub struct MemoryCacheBackend {
    inner: RwLock<Inner>,
}

impl MemoryCacheBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in one namespace, for tests and diagnostics.
    pub async fn namespace_len(&self, namespace: &str) -> usize {
        self.inner
            .read()
            .await
            .namespaces
            .get(namespace)
            .map(|entries| entries.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl CacheBackend for MemoryCacheBackend {
    async fn get(&self, namespace: &str, url: &str) -> WyldResult<Option<ResponseSnapshot>> {
        let mut inner = self.inner.write().await;
        let found = inner
            .namespaces
            .get(namespace)
            .and_then(|entries| entries.get(url))
            .cloned();
        match found {
            Some(response) => {
                inner.hits += 1;
                Ok(Some(response))
            }
            None => {
                inner.misses += 1;
                Ok(None)
            }
        }
    }

    async fn put(&self, namespace: &str, url: &str, response: ResponseSnapshot) -> WyldResult<()> {
        let mut inner = self.inner.write().await;
        inner
            .namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(url.to_string(), response);
        Ok(())
    }

    async fn delete(&self, namespace: &str, url: &str) -> WyldResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner
            .namespaces
            .get_mut(namespace)
            .map(|entries| entries.remove(url).is_some())
            .unwrap_or(false))
    }

    async fn list_namespaces(&self) -> WyldResult<Vec<String>> {
        let inner = self.inner.read().await;
        let mut names: Vec<String> = inner.namespaces.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn delete_namespace(&self, namespace: &str) -> WyldResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.namespaces.remove(namespace).is_some())
    }

    async fn stats(&self) -> WyldResult<CacheStats> {
        let inner = self.inner.read().await;
        Ok(CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            entry_count: inner
                .namespaces
                .values()
                .map(|entries| entries.len() as u64)
                .sum(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let backend = MemoryCacheBackend::new();
        backend
            .put("wyld-fyre-v1", "/logo.png", ResponseSnapshot::ok(b"png".to_vec()))
            .await
            .unwrap();

        let found = backend.get("wyld-fyre-v1", "/logo.png").await.unwrap();
        assert_eq!(found.unwrap().body, b"png");
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_entry() {
        let backend = MemoryCacheBackend::new();
        backend
            .put("ns", "/a", ResponseSnapshot::ok(b"old".to_vec()))
            .await
            .unwrap();
        backend
            .put("ns", "/a", ResponseSnapshot::ok(b"new".to_vec()))
            .await
            .unwrap();

        let found = backend.get("ns", "/a").await.unwrap().unwrap();
        assert_eq!(found.body, b"new");
        assert_eq!(backend.namespace_len("ns").await, 1);
    }

    #[tokio::test]
    async fn test_namespace_isolation() {
        let backend = MemoryCacheBackend::new();
        backend
            .put("ns-a", "/a", ResponseSnapshot::ok(vec![]))
            .await
            .unwrap();

        assert!(backend.get("ns-b", "/a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_namespace() {
        let backend = MemoryCacheBackend::new();
        backend
            .put("ns", "/a", ResponseSnapshot::ok(vec![]))
            .await
            .unwrap();

        assert!(backend.delete_namespace("ns").await.unwrap());
        assert!(!backend.delete_namespace("ns").await.unwrap());
        assert!(backend.list_namespaces().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stats_track_hits_and_misses() {
        let backend = MemoryCacheBackend::new();
        backend
            .put("ns", "/a", ResponseSnapshot::ok(vec![]))
            .await
            .unwrap();

        backend.get("ns", "/a").await.unwrap();
        backend.get("ns", "/missing").await.unwrap();

        let stats = backend.stats().await.unwrap();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entry_count, 1);
    }
}
