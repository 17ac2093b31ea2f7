//! Branch strategy selection for execution plans.
//!
//! First-match-wins rule chain: protected branch, then high risk, then
//! plan size, then execute in place.

use crate::risk::assess_risk;
use wyldfyre_core::{BranchConfig, BranchStrategy, BranchStrategyDecision, EntityId, Plan};

/// Maximum length of the title-derived slug portion of a branch name.
const SLUG_MAX_LEN: usize = 40;
/// Length of the plan-id suffix appended to suggested names.
const ID_SUFFIX_LEN: usize = 8;

/// Recommend where a plan's changes should land.
///
/// Rules, first match wins:
/// 1. `current_branch` is protected and the config auto-branches for
///    protected branches -> new branch
/// 2. the plan assesses as high risk -> new branch
/// 3. the plan has at least `step_threshold` steps -> new branch
/// 4. otherwise -> execute on the current branch
pub fn determine_branch_strategy(
    plan: &Plan,
    current_branch: &str,
    config: &BranchConfig,
) -> BranchStrategyDecision {
    let assessment = assess_risk(plan);
    let is_protected = config.is_protected(current_branch);

    if is_protected && config.auto_branch_for_protected {
        return BranchStrategyDecision {
            strategy: BranchStrategy::NewBranch,
            reason: format!(
                "'{}' is a protected branch; plans are never executed on it directly",
                current_branch
            ),
            suggested_branch_name: Some(suggest_branch_name(&plan.title, plan.plan_id, config)),
            is_protected_branch: true,
            risk_level: assessment.risk_level,
        };
    }

    if assessment.risk_level == wyldfyre_core::RiskLevel::High {
        return BranchStrategyDecision {
            strategy: BranchStrategy::NewBranch,
            reason: "This plan makes significant changes that are safer on a dedicated branch"
                .to_string(),
            suggested_branch_name: Some(suggest_branch_name(&plan.title, plan.plan_id, config)),
            is_protected_branch: is_protected,
            risk_level: assessment.risk_level,
        };
    }

    if plan.steps.len() >= config.step_threshold {
        return BranchStrategyDecision {
            strategy: BranchStrategy::NewBranch,
            reason: format!(
                "With {} steps this plan is large enough to isolate on its own branch",
                plan.steps.len()
            ),
            suggested_branch_name: Some(suggest_branch_name(&plan.title, plan.plan_id, config)),
            is_protected_branch: is_protected,
            risk_level: assessment.risk_level,
        };
    }

    BranchStrategyDecision {
        strategy: BranchStrategy::Current,
        reason: "Low risk and small enough to execute on the current branch".to_string(),
        suggested_branch_name: None,
        is_protected_branch: is_protected,
        risk_level: assessment.risk_level,
    }
}

/// Derive a git-safe branch name from a plan title and id.
///
/// The title is lowercased, every run of non-alphanumeric characters is
/// collapsed to a single hyphen, leading/trailing hyphens are stripped,
/// and the slug is truncated to 40 characters before an 8-character prefix
/// of the plan id is appended under the configured prefix.
pub fn suggest_branch_name(title: &str, plan_id: EntityId, config: &BranchConfig) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for ch in title.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }
    slug.truncate(SLUG_MAX_LEN);
    let slug = slug.trim_matches('-');

    let id_hex = plan_id.simple().to_string();
    let id_suffix = &id_hex[..ID_SUFFIX_LEN];

    if slug.is_empty() {
        format!("{}{}", config.branch_prefix, id_suffix)
    } else {
        format!("{}{}-{}", config.branch_prefix, slug, id_suffix)
    }
}
