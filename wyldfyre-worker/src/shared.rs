//! Read-once store for share-target content.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use wyldfyre_core::{SharedContentEntry, Timestamp};

/// Single-slot store holding the most recent OS share.
///
/// A new share overwrites any unconsumed one. Reads consume: the entry is
/// deleted on a successful read, and an entry older than the freshness
/// window reads as absent (and is dropped) rather than erroring.
pub struct SharedContentStore {
    slot: Mutex<Option<SharedContentEntry>>,
    ttl: Duration,
}

impl SharedContentStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Mutex::new(None),
            ttl,
        }
    }

    /// Store newly shared content, replacing any pending entry.
    pub async fn store(&self, content: impl Into<String>) {
        let mut slot = self.slot.lock().await;
        *slot = Some(SharedContentEntry::new(content));
    }

    /// Consume the pending share, if any and still fresh.
    pub async fn take(&self) -> Option<String> {
        self.take_at(Utc::now()).await
    }

    /// Consume with an explicit clock, so freshness is testable.
    pub async fn take_at(&self, now: Timestamp) -> Option<String> {
        let mut slot = self.slot.lock().await;
        match slot.take() {
            Some(entry) if !entry.is_expired(now, self.ttl) => Some(entry.content),
            _ => None,
        }
    }
}
