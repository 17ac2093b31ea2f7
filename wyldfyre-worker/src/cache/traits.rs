//! Cache backend trait.
//!
//! Abstracts over the browser cache storage primitive so the store and
//! router are testable against an in-memory double.

use async_trait::async_trait;
use wyldfyre_core::{ResponseSnapshot, WyldResult};

/// Pluggable cache backend.
///
/// Entries are (request URL, response snapshot) pairs grouped under named
/// namespaces. Implementations must be thread-safe; writes within one
/// namespace may be serialized internally.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Look up a stored response by URL within a namespace.
    async fn get(&self, namespace: &str, url: &str) -> WyldResult<Option<ResponseSnapshot>>;

    /// Store a response under a URL, overwriting any existing entry.
    async fn put(&self, namespace: &str, url: &str, response: ResponseSnapshot) -> WyldResult<()>;

    /// Delete a single entry. Returns true if an entry existed.
    async fn delete(&self, namespace: &str, url: &str) -> WyldResult<bool>;

    /// Enumerate all namespaces currently present, across all products.
    async fn list_namespaces(&self) -> WyldResult<Vec<String>>;

    /// Delete an entire namespace. Returns true if it existed.
    async fn delete_namespace(&self, namespace: &str) -> WyldResult<bool>;

    /// Get cache statistics.
    async fn stats(&self) -> WyldResult<CacheStats>;
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Number of entries across all namespaces.
    pub entry_count: u64,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
