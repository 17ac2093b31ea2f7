//! Configuration types
//!
//! The cache generation is an injected value rather than a constant baked
//! into the worker source: bumping it is what invalidates every previously
//! cached asset, so it must be visible to deploy tooling and to tests.

use crate::error::{ConfigError, WyldResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Master configuration for the worker runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Product prefix shared by every cache generation (e.g. `wyld-fyre`).
    pub cache_prefix: String,
    /// Version tag of the current generation (e.g. `v17`). Together with
    /// the prefix it forms the active cache namespace.
    pub cache_generation: String,

    /// Substring marking live API traffic that must never be cached.
    pub api_marker: String,

    /// Page served to failed navigations when the network is down.
    pub offline_url: String,
    /// Root document; last-resort navigation fallback.
    pub root_url: String,
    /// Chat page targeted by share-target and protocol redirects.
    pub chat_url: String,
    /// Fixed path the OS share sheet POSTs to.
    pub share_path: String,

    /// Query parameter carrying a custom-protocol URL (`web+wyldfyre://...`).
    pub protocol_param: String,
    /// The registered custom protocol scheme.
    pub protocol_scheme: String,

    /// Assets that must precache successfully or installation aborts.
    pub essential_assets: Vec<String>,
    /// Assets precached best-effort (platform splash screens).
    pub optional_assets: Vec<String>,

    /// Freshness window for a stored share before it reads as absent.
    pub shared_content_ttl: Duration,

    /// Default notification tag when the push payload carries none.
    pub notification_tag: String,
    pub notification_icon: String,
    pub notification_badge: String,
    /// Default vibration pattern for non-iOS notifications.
    pub default_vibrate: Vec<u32>,
}

impl WorkerConfig {
    /// Build the standard Wyld Fyre configuration for one cache generation.
    ///
    /// This centralizes the product defaults so hosts only have to decide
    /// the generation tag.
    pub fn for_generation(generation: impl Into<String>) -> Self {
        Self {
            cache_prefix: "wyld-fyre".to_string(),
            cache_generation: generation.into(),
            api_marker: "/api/".to_string(),
            offline_url: "/offline.html".to_string(),
            root_url: "/".to_string(),
            chat_url: "/chat".to_string(),
            share_path: "/share-target".to_string(),
            protocol_param: "protocol".to_string(),
            protocol_scheme: "web+wyldfyre".to_string(),
            essential_assets: vec![
                "/".to_string(),
                "/offline.html".to_string(),
                "/manifest.json".to_string(),
                "/icons/icon-192.png".to_string(),
                "/icons/icon-512.png".to_string(),
            ],
            optional_assets: Vec::new(),
            shared_content_ttl: Duration::from_secs(300),
            notification_tag: "wyld-fyre".to_string(),
            notification_icon: "/icons/icon-192.png".to_string(),
            notification_badge: "/icons/badge-72.png".to_string(),
            default_vibrate: vec![200, 100, 200],
        }
    }

    /// The active cache namespace: `{prefix}-{generation}`.
    pub fn cache_name(&self) -> String {
        format!("{}-{}", self.cache_prefix, self.cache_generation)
    }

    /// Whether `namespace` belongs to this product but not to the current
    /// generation, making it eligible for deletion at activate time.
    pub fn is_stale_namespace(&self, namespace: &str) -> bool {
        namespace.starts_with(&format!("{}-", self.cache_prefix))
            && namespace != self.cache_name()
    }

    /// Validate the configuration.
    ///
    /// Validates:
    /// - cache_prefix and cache_generation are non-empty
    /// - the generation tag contains no separator that would break
    ///   stale-namespace matching
    /// - shared_content_ttl is positive
    /// - essential assets are non-empty and all asset URLs are rooted
    pub fn validate(&self) -> WyldResult<()> {
        if self.cache_prefix.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "cache_prefix".to_string(),
            }
            .into());
        }
        if self.cache_generation.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "cache_generation".to_string(),
            }
            .into());
        }
        if self.shared_content_ttl.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "shared_content_ttl".to_string(),
                value: "0".to_string(),
                reason: "freshness window must be positive".to_string(),
            }
            .into());
        }
        if self.essential_assets.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "essential_assets".to_string(),
            }
            .into());
        }
        for url in self.essential_assets.iter().chain(&self.optional_assets) {
            if !url.starts_with('/') && !url.starts_with("http") {
                return Err(ConfigError::InvalidValue {
                    field: "essential_assets".to_string(),
                    value: url.clone(),
                    reason: "asset URLs must be rooted or absolute".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Configuration for the branch strategy selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchConfig {
    /// Force a new branch whenever the current branch is protected.
    pub auto_branch_for_protected: bool,
    /// Step count at or above which a new branch is recommended.
    pub step_threshold: usize,
    /// Prefix for suggested branch names.
    pub branch_prefix: String,
    /// Branch names (case-insensitive) that must never receive direct
    /// plan execution.
    pub protected_branches: Vec<String>,
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            auto_branch_for_protected: true,
            step_threshold: 5,
            branch_prefix: "plan/".to_string(),
            protected_branches: vec![
                "main".to_string(),
                "master".to_string(),
                "production".to_string(),
                "prod".to_string(),
                "release".to_string(),
                "staging".to_string(),
            ],
        }
    }
}

impl BranchConfig {
    /// Case-insensitive protected-branch check.
    pub fn is_protected(&self, branch: &str) -> bool {
        self.protected_branches
            .iter()
            .any(|p| p.eq_ignore_ascii_case(branch))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> WyldResult<()> {
        if self.step_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                field: "step_threshold".to_string(),
                value: "0".to_string(),
                reason: "threshold of zero would branch every plan".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_name_joins_prefix_and_generation() {
        let config = WorkerConfig::for_generation("v17");
        assert_eq!(config.cache_name(), "wyld-fyre-v17");
    }

    #[test]
    fn test_stale_namespace_matching() {
        let config = WorkerConfig::for_generation("v17");
        assert!(config.is_stale_namespace("wyld-fyre-v16"));
        assert!(config.is_stale_namespace("wyld-fyre-v18"));
        assert!(!config.is_stale_namespace("wyld-fyre-v17"));
        // Other products' namespaces are never ours to delete.
        assert!(!config.is_stale_namespace("other-app-v3"));
    }

    #[test]
    fn test_default_config_validates() {
        assert!(WorkerConfig::for_generation("v17").validate().is_ok());
        assert!(BranchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_generation_rejected() {
        let config = WorkerConfig::for_generation("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unrooted_asset_rejected() {
        let mut config = WorkerConfig::for_generation("v17");
        config.essential_assets.push("icons/icon-192.png".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_protected_branch_case_insensitive() {
        let config = BranchConfig::default();
        assert!(config.is_protected("main"));
        assert!(config.is_protected("MAIN"));
        assert!(config.is_protected("Staging"));
        assert!(!config.is_protected("feature/login"));
    }

    #[test]
    fn test_zero_step_threshold_rejected() {
        let config = BranchConfig {
            step_threshold: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
