//! Execution plan entities and derived decision types.
//!
//! A `Plan` is the unit the dashboard asks the agent backend to execute: an
//! ordered list of steps plus the files the agent explored while drafting
//! it. Risk assessment and branch strategy are *derived* from a plan, never
//! stored on it.

use crate::enums::{BranchStrategy, RiskLevel};
use crate::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a single plan step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanStepStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
    Skipped,
}

/// One step of an execution plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: PlanStepStatus,
}

impl PlanStep {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: PlanStepStatus::Pending,
        }
    }
}

/// An AI-generated execution plan.
///
/// `steps` and `files_explored` both default to empty on deserialization:
/// a plan fresh from the backend may carry neither, and the scoring rules
/// treat absence as zero contribution rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub plan_id: EntityId,
    pub title: String,
    #[serde(default)]
    pub steps: Vec<PlanStep>,
    #[serde(default)]
    pub files_explored: Vec<String>,
    pub created_at: Timestamp,
}

/// Derived risk classification for a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRiskAssessment {
    /// Additive score from the step-count, file-pattern, and keyword rules.
    pub risk_score: u32,
    pub risk_level: RiskLevel,
}

/// Derived branching recommendation for a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchStrategyDecision {
    pub strategy: BranchStrategy,
    /// Human-readable rationale shown in the dashboard.
    pub reason: String,
    /// Populated only when `strategy` is `NewBranch`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_branch_name: Option<String>,
    pub is_protected_branch: bool,
    pub risk_level: RiskLevel,
}
