//! Wyld Fyre Test Utilities
//!
//! Centralized test infrastructure for the Wyld Fyre workspace:
//! - Fixtures for plans, push payloads, and worker configuration
//! - Proptest generators for entity and enum types

// Re-export core types for convenience
pub use wyldfyre_core::{
    BranchConfig, BranchStrategy, ClientPlatform, EntityId, HttpMethod, NotificationAction,
    NotificationData, NotificationOptions, Plan, PlanStep, PlanStepStatus, PushKind, PushPayload,
    RequestSnapshot, ResponseSnapshot, RiskLevel, SharedContentEntry, Timestamp, WorkerConfig,
    new_entity_id,
};

use chrono::Utc;
use uuid::Uuid;

// ============================================================================
// FIXTURES
// ============================================================================

/// A plan with `count` pending steps and no explored files.
pub fn plan_with_steps(count: usize) -> Plan {
    Plan {
        plan_id: new_entity_id(),
        title: format!("Plan with {} steps", count),
        steps: (0..count)
            .map(|i| PlanStep::new(format!("Step {}", i + 1), ""))
            .collect(),
        files_explored: Vec::new(),
        created_at: Utc::now(),
    }
}

/// A plan whose risk comes only from the files it touched.
pub fn plan_with_files(files: &[&str]) -> Plan {
    Plan {
        files_explored: files.iter().map(|f| f.to_string()).collect(),
        ..plan_with_steps(1)
    }
}

/// A single-step plan with the given title, for branch-name tests.
pub fn plan_titled(title: &str) -> Plan {
    Plan {
        title: title.to_string(),
        ..plan_with_steps(1)
    }
}

/// A plan with a fixed id, so derived branch-name suffixes are stable.
pub fn plan_with_id(title: &str, id: Uuid) -> Plan {
    Plan {
        plan_id: id,
        ..plan_titled(title)
    }
}

/// JSON bytes for a chat-message push about a conversation.
pub fn message_push(conversation_id: &str) -> Vec<u8> {
    format!(
        r#"{{"type":"message","title":"New message","body":"You have a reply","url":"/chat/{id}","conversationId":"{id}"}}"#,
        id = conversation_id
    )
    .into_bytes()
}

/// JSON bytes for an agent-status push.
pub fn agent_status_push(agent_name: &str) -> Vec<u8> {
    format!(
        r#"{{"type":"agent_status","title":"Agent update","body":"{name} finished","url":"/agents/{name}","agentName":"{name}"}}"#,
        name = agent_name
    )
    .into_bytes()
}

/// Worker configuration with a small, deterministic asset list.
pub fn test_worker_config(generation: &str) -> WorkerConfig {
    let mut config = WorkerConfig::for_generation(generation);
    config.essential_assets = vec!["/".to_string(), "/offline.html".to_string()];
    config.optional_assets = Vec::new();
    config
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for Wyld Fyre entity types.

    use super::*;
    use proptest::prelude::*;

    /// Generate a random UUID (for generic ID generation).
    pub fn arb_uuid() -> impl Strategy<Value = Uuid> {
        any::<[u8; 16]>().prop_map(Uuid::from_bytes)
    }

    /// Generate a Timestamp within a reasonable range (2020-2030).
    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        (1577836800i64..1893456000i64)
            .prop_map(|secs| chrono::DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now))
    }

    /// Generate a RiskLevel variant.
    pub fn arb_risk_level() -> impl Strategy<Value = RiskLevel> {
        prop_oneof![
            Just(RiskLevel::Low),
            Just(RiskLevel::Medium),
            Just(RiskLevel::High),
        ]
    }

    /// Generate a PushKind variant.
    pub fn arb_push_kind() -> impl Strategy<Value = PushKind> {
        prop_oneof![
            Just(PushKind::Message),
            Just(PushKind::AgentStatus),
            Just(PushKind::Task),
            Just(PushKind::Generic),
        ]
    }

    /// Generate a ClientPlatform variant.
    pub fn arb_platform() -> impl Strategy<Value = ClientPlatform> {
        prop_oneof![
            Just(ClientPlatform::Web),
            Just(ClientPlatform::Ios),
            Just(ClientPlatform::Android),
        ]
    }

    /// Generate a PlanStepStatus variant.
    pub fn arb_step_status() -> impl Strategy<Value = PlanStepStatus> {
        prop_oneof![
            Just(PlanStepStatus::Pending),
            Just(PlanStepStatus::InProgress),
            Just(PlanStepStatus::Completed),
            Just(PlanStepStatus::Failed),
            Just(PlanStepStatus::Skipped),
        ]
    }

    /// Generate a plan step with printable title text.
    pub fn arb_plan_step() -> impl Strategy<Value = PlanStep> {
        ("[ -~]{1,40}", "[ -~]{0,80}", arb_step_status()).prop_map(
            |(title, description, status)| PlanStep {
                title,
                description,
                status,
            },
        )
    }

    /// Generate a plan with 0..max_steps steps and benign file paths.
    pub fn arb_plan(max_steps: usize) -> impl Strategy<Value = Plan> {
        (
            arb_uuid(),
            "[ -~]{1,60}",
            prop::collection::vec(arb_plan_step(), 0..=max_steps),
            prop::collection::vec("[a-z]{1,8}/[a-z]{1,8}\\.rs", 0..4),
            arb_timestamp(),
        )
            .prop_map(|(plan_id, title, steps, files_explored, created_at)| Plan {
                plan_id,
                title,
                steps,
                files_explored,
                created_at,
            })
    }

    /// Generate an arbitrary plan title, including punctuation and unicode.
    pub fn arb_plan_title() -> impl Strategy<Value = String> {
        prop_oneof![
            "[ -~]{1,80}",
            "\\PC{1,40}",
            Just("   ".to_string()),
            Just("!!!".to_string()),
        ]
    }

    /// Generate a push payload with any subset of fields populated.
    pub fn arb_push_payload() -> impl Strategy<Value = PushPayload> {
        (
            prop::option::of("[ -~]{1,40}"),
            prop::option::of("[ -~]{0,120}"),
            prop::option::of("[a-z0-9-]{1,20}"),
            prop::option::of(any::<bool>()),
            prop::option::of(arb_push_kind()),
            prop::option::of("/[a-z/]{0,30}"),
        )
            .prop_map(|(title, body, tag, renotify, kind, url)| PushPayload {
                title,
                body,
                tag,
                renotify,
                kind,
                url,
                ..Default::default()
            })
    }
}
