//! Additive risk scoring for execution plans.
//!
//! Three independent rules contribute to a single score:
//! step count, high-risk file paths, and risky keywords in step text.
//! The rule tables are named constants rather than inline literals so
//! deployments can audit and tune them against real usage data.

use wyldfyre_core::{Plan, PlanRiskAssessment, RiskLevel};

/// Path fragments that mark a touched file as high-risk.
///
/// Matched case-insensitively as substrings of the explored file path.
/// Covers environment files, package manifests, container and CI config,
/// config directories, database migrations/schemas, and auth/security code.
pub const HIGH_RISK_PATH_PATTERNS: &[&str] = &[
    ".env",
    "package.json",
    "cargo.toml",
    "pnpm-lock",
    "dockerfile",
    "docker-compose",
    ".yml",
    ".yaml",
    "config/",
    "migration",
    "schema",
    "auth",
    "security",
];

/// Keywords in a step title or description that mark the plan as touching
/// destructive or deployment-facing territory.
pub const RISKY_KEYWORDS: &[&str] = &["delete", "remove", "drop", "migrate", "deploy", "rollback"];

/// Score contributed by the step-count brackets (highest bracket wins).
const MANY_STEPS: usize = 8;
const SEVERAL_STEPS: usize = 5;
const FEW_STEPS: usize = 3;

/// Score at or above which a plan is high risk.
const HIGH_THRESHOLD: u32 = 5;
/// Score at or above which a plan is medium risk.
const MEDIUM_THRESHOLD: u32 = 3;

/// Classify a plan's risk.
///
/// Scoring is additive:
/// - step count: >=8 steps +3, >=5 +2, >=3 +1 (mutually exclusive)
/// - high-risk files: more than 3 matches +3, 1-3 matches +2
/// - any risky keyword anywhere in step text: +2 flat
///
/// A score >=5 maps to `High`, >=3 to `Medium`, anything less to `Low`.
pub fn assess_risk(plan: &Plan) -> PlanRiskAssessment {
    let mut score = step_count_score(plan.steps.len());
    score += risky_file_score(&plan.files_explored);
    if has_risky_keyword(plan) {
        score += 2;
    }

    let risk_level = if score >= HIGH_THRESHOLD {
        RiskLevel::High
    } else if score >= MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    PlanRiskAssessment {
        risk_score: score,
        risk_level,
    }
}

fn step_count_score(count: usize) -> u32 {
    if count >= MANY_STEPS {
        3
    } else if count >= SEVERAL_STEPS {
        2
    } else if count >= FEW_STEPS {
        1
    } else {
        0
    }
}

fn risky_file_score(files: &[String]) -> u32 {
    let matches = files
        .iter()
        .filter(|path| {
            let lowered = path.to_lowercase();
            HIGH_RISK_PATH_PATTERNS
                .iter()
                .any(|pattern| lowered.contains(pattern))
        })
        .count();

    if matches > 3 {
        3
    } else if matches >= 1 {
        2
    } else {
        0
    }
}

/// Flat check: the bonus applies once no matter how many steps match.
fn has_risky_keyword(plan: &Plan) -> bool {
    plan.steps.iter().any(|step| {
        let text = format!("{} {}", step.title, step.description).to_lowercase();
        RISKY_KEYWORDS.iter().any(|keyword| text.contains(keyword))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use wyldfyre_core::{new_entity_id, PlanStep};

    fn plan_with(steps: Vec<PlanStep>, files: Vec<&str>) -> Plan {
        Plan {
            plan_id: new_entity_id(),
            title: "Test plan".to_string(),
            steps,
            files_explored: files.into_iter().map(String::from).collect(),
            created_at: Utc::now(),
        }
    }

    fn generic_steps(n: usize) -> Vec<PlanStep> {
        (0..n)
            .map(|i| PlanStep::new(format!("Step {}", i), "adjust formatting"))
            .collect()
    }

    #[test]
    fn test_empty_plan_is_low_risk() {
        let assessment = assess_risk(&plan_with(vec![], vec![]));
        assert_eq!(assessment.risk_score, 0);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_step_count_brackets() {
        assert_eq!(assess_risk(&plan_with(generic_steps(2), vec![])).risk_score, 0);
        assert_eq!(assess_risk(&plan_with(generic_steps(3), vec![])).risk_score, 1);
        assert_eq!(assess_risk(&plan_with(generic_steps(5), vec![])).risk_score, 2);
        assert_eq!(assess_risk(&plan_with(generic_steps(8), vec![])).risk_score, 3);
        // Brackets are mutually exclusive - a big plan is not 3+2+1.
        assert_eq!(assess_risk(&plan_with(generic_steps(20), vec![])).risk_score, 3);
    }

    #[test]
    fn test_eight_generic_steps_alone_is_medium_not_high() {
        let assessment = assess_risk(&plan_with(generic_steps(8), vec![]));
        assert_eq!(assessment.risk_score, 3);
        assert_eq!(assessment.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_eight_steps_plus_risky_file_is_high() {
        let assessment = assess_risk(&plan_with(generic_steps(8), vec![".env.local"]));
        assert_eq!(assessment.risk_score, 5);
        assert_eq!(assessment.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_file_match_brackets() {
        let one = assess_risk(&plan_with(vec![], vec!["src/auth/session.ts"]));
        assert_eq!(one.risk_score, 2);

        let three = assess_risk(&plan_with(
            vec![],
            vec!["Dockerfile", "db/schema.sql", "ci.yml"],
        ));
        assert_eq!(three.risk_score, 2);

        let four = assess_risk(&plan_with(
            vec![],
            vec!["Dockerfile", "db/schema.sql", "ci.yml", "package.json"],
        ));
        assert_eq!(four.risk_score, 3);
    }

    #[test]
    fn test_plain_files_do_not_score() {
        let assessment = assess_risk(&plan_with(
            vec![],
            vec!["src/components/Button.tsx", "README.md"],
        ));
        assert_eq!(assessment.risk_score, 0);
    }

    #[test]
    fn test_keyword_bonus_is_flat() {
        let one = plan_with(
            vec![PlanStep::new("Delete stale rows", "")],
            vec![],
        );
        let many = plan_with(
            vec![
                PlanStep::new("Delete stale rows", ""),
                PlanStep::new("Drop old index", ""),
                PlanStep::new("Deploy to staging", "then rollback if needed"),
            ],
            vec![],
        );
        assert_eq!(assess_risk(&one).risk_score, 2);
        // 3 steps -> +1, keywords still +2 flat.
        assert_eq!(assess_risk(&many).risk_score, 3);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive_substring() {
        let plan = plan_with(
            vec![PlanStep::new("Cleanup", "REMOVES the legacy shim")],
            vec![],
        );
        assert_eq!(assess_risk(&plan).risk_score, 2);
    }

    #[test]
    fn test_keyword_in_description_counts() {
        let plan = plan_with(
            vec![PlanStep::new("Finalize", "deploy the new config")],
            vec![],
        );
        assert_eq!(assess_risk(&plan).risk_score, 2);
    }
}
