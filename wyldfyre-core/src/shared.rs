//! Shared-content entry for the OS share-target intake.

use crate::Timestamp;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single ephemeral record produced by the share-target endpoint.
///
/// The entry is read-once: consumers delete it on a successful read, and
/// must treat it as expired once it is older than the configured TTL even
/// if it has not been deleted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedContentEntry {
    /// Non-empty share fields (`title`, `text`, `url`) joined by newlines.
    pub content: String,
    pub created_at: Timestamp,
}

impl SharedContentEntry {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Whether the entry is past its freshness window as of `now`.
    pub fn is_expired(&self, now: Timestamp, ttl: Duration) -> bool {
        now.signed_duration_since(self.created_at)
            .to_std()
            .map(|age| age > ttl)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    const TTL: Duration = Duration::from_secs(300);

    #[test]
    fn test_fresh_entry_is_not_expired() {
        let entry = SharedContentEntry::new("shared text");
        let just_under = entry.created_at + ChronoDuration::seconds(299);
        assert!(!entry.is_expired(just_under, TTL));
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let entry = SharedContentEntry::new("shared text");
        let just_over = entry.created_at + ChronoDuration::seconds(301);
        assert!(entry.is_expired(just_over, TTL));
    }

    #[test]
    fn test_clock_skew_does_not_expire() {
        // A "now" before created_at can happen across devices; never expire.
        let entry = SharedContentEntry::new("shared text");
        let before = entry.created_at - ChronoDuration::seconds(10);
        assert!(!entry.is_expired(before, TTL));
    }
}
