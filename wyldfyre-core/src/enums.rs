//! Enum types for Wyld Fyre worker entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CORE ENUMS
// ============================================================================

/// Risk classification for an execution plan.
///
/// Ordered so that comparisons read naturally: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Where a plan's changes should land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BranchStrategy {
    /// Execute in place on the current branch.
    Current,
    /// Create a dedicated branch for the plan first.
    NewBranch,
}

/// Category of an inbound push message, carried in the notification data bag.
///
/// Unknown categories from the server deserialize as `Generic` rather than
/// failing the whole payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PushKind {
    /// A chat message addressed to the user.
    Message,
    /// An agent changed state (started, finished, errored).
    AgentStatus,
    /// A task or plan step completed.
    Task,
    /// Anything else.
    #[default]
    #[serde(other)]
    Generic,
}

/// HTTP request method as seen by the fetch interception point.
///
/// Only the methods the router actually discriminates on get their own
/// variant; everything else is `Other` and is never intercepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Other(String),
}

impl HttpMethod {
    pub fn is_get(&self) -> bool {
        matches!(self, HttpMethod::Get)
    }

    pub fn is_post(&self) -> bool {
        matches!(self, HttpMethod::Post)
    }
}

impl FromStr for HttpMethod {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            other => HttpMethod::Other(other.to_string()),
        })
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Other(m) => write!(f, "{}", m),
        }
    }
}

/// Platform of the controlling client, reported via `SET_PLATFORM`.
///
/// iOS notification rendering does not reliably support vibration patterns,
/// inline images, or action buttons, so the notification builder gates those
/// fields on this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClientPlatform {
    #[default]
    Web,
    Ios,
    Android,
}

impl ClientPlatform {
    /// True when the platform cannot render rich notification fields.
    pub fn is_ios(&self) -> bool {
        matches!(self, ClientPlatform::Ios)
    }
}
