//! Wyld Fyre Core - Worker Data Types
//!
//! Pure data structures with no behavior beyond constructors and simple
//! predicates. All other crates depend on this. This crate contains ONLY
//! data types - no routing, caching, or scoring logic.

pub mod config;
pub mod enums;
pub mod error;
pub mod fetch;
pub mod notification;
pub mod plan;
pub mod shared;

pub use config::{BranchConfig, WorkerConfig};
pub use enums::{BranchStrategy, ClientPlatform, HttpMethod, PushKind, RiskLevel};
pub use error::{CacheError, ConfigError, NotifyError, RouteError, WyldError, WyldResult};
pub use fetch::{RequestSnapshot, ResponseSnapshot};
pub use notification::{
    NotificationAction, NotificationData, NotificationOptions, PushPayload,
};
pub use plan::{BranchStrategyDecision, Plan, PlanRiskAssessment, PlanStep, PlanStepStatus};
pub use shared::SharedContentEntry;

use chrono::{DateTime, Utc};
use uuid::Uuid;

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Entity identifier using UUIDv7 for timestamp-sortable IDs.
pub type EntityId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 EntityId (timestamp-sortable).
pub fn new_entity_id() -> EntityId {
    Uuid::now_v7()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ids_are_time_sortable() {
        let a = new_entity_id();
        let b = new_entity_id();
        assert!(a <= b);
    }
}
