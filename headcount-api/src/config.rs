//! API Configuration Module
//!
//! Configuration for CORS, the count edit policy, startup bootstrap and the
//! metrics endpoint. Everything is loaded from environment variables with
//! development-friendly defaults.

// ============================================================================
// EDIT POLICY
// ============================================================================

/// Server-side rules applied to count edits beyond integer parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditPolicy {
    /// Reject negative counts before the store is touched.
    pub reject_negative: bool,
}

impl Default for EditPolicy {
    fn default() -> Self {
        Self {
            reject_negative: true,
        }
    }
}

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    // ========================================================================
    // CORS Configuration
    // ========================================================================
    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,

    /// Whether to allow credentials in CORS requests.
    pub cors_allow_credentials: bool,

    /// Max age for CORS preflight cache in seconds.
    pub cors_max_age_secs: u64,

    // ========================================================================
    // Behaviour
    // ========================================================================
    pub edit_policy: EditPolicy,

    /// Create the table and load the sample dataset when it is empty.
    pub seed_on_startup: bool,

    /// Mount the Prometheus `/metrics` endpoint.
    pub metrics_enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(), // Empty = allow all
            cors_allow_credentials: false,
            cors_max_age_secs: 86400, // 24 hours
            edit_policy: EditPolicy::default(),
            seed_on_startup: true,
            metrics_enabled: true,
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `HEADCOUNT_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `HEADCOUNT_CORS_ALLOW_CREDENTIALS`: "true" or "false" (default: false)
    /// - `HEADCOUNT_CORS_MAX_AGE_SECS`: Preflight cache duration (default: 86400)
    /// - `HEADCOUNT_REJECT_NEGATIVE_COUNTS`: "true" or "false" (default: true)
    /// - `HEADCOUNT_SEED_ON_STARTUP`: "true" or "false" (default: true)
    /// - `HEADCOUNT_METRICS_ENABLED`: "true" or "false" (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let cors_origins = lookup("HEADCOUNT_CORS_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let cors_allow_credentials = lookup("HEADCOUNT_CORS_ALLOW_CREDENTIALS")
            .map(|s| parse_flag(&s, false))
            .unwrap_or(defaults.cors_allow_credentials);

        let cors_max_age_secs = lookup("HEADCOUNT_CORS_MAX_AGE_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.cors_max_age_secs);

        let reject_negative = lookup("HEADCOUNT_REJECT_NEGATIVE_COUNTS")
            .map(|s| parse_flag(&s, true))
            .unwrap_or(defaults.edit_policy.reject_negative);

        let seed_on_startup = lookup("HEADCOUNT_SEED_ON_STARTUP")
            .map(|s| parse_flag(&s, true))
            .unwrap_or(defaults.seed_on_startup);

        let metrics_enabled = lookup("HEADCOUNT_METRICS_ENABLED")
            .map(|s| parse_flag(&s, true))
            .unwrap_or(defaults.metrics_enabled);

        Self {
            cors_origins,
            cors_allow_credentials,
            cors_max_age_secs,
            edit_policy: EditPolicy { reject_negative },
            seed_on_startup,
            metrics_enabled,
        }
    }
}

/// Parse a boolean flag, falling back to `default` for unrecognised text.
pub(crate) fn parse_flag(value: &str, default: bool) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => true,
        "false" | "0" | "no" | "off" => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert!(config.cors_origins.is_empty());
        assert!(!config.cors_allow_credentials);
        assert_eq!(config.cors_max_age_secs, 86400);
        assert!(config.edit_policy.reject_negative);
        assert!(config.seed_on_startup);
        assert!(config.metrics_enabled);
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[]));
        assert!(config.cors_origins.is_empty());
        assert!(config.edit_policy.reject_negative);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("HEADCOUNT_CORS_ORIGINS", "https://a.example, ,https://b.example"),
            ("HEADCOUNT_REJECT_NEGATIVE_COUNTS", "false"),
            ("HEADCOUNT_SEED_ON_STARTUP", "0"),
            ("HEADCOUNT_CORS_MAX_AGE_SECS", "60"),
        ]));
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert!(!config.edit_policy.reject_negative);
        assert!(!config.seed_on_startup);
        assert_eq!(config.cors_max_age_secs, 60);
    }

    #[test]
    fn test_parse_flag_fallback() {
        assert!(parse_flag("TRUE", false));
        assert!(!parse_flag("off", true));
        assert!(parse_flag("maybe", true));
        assert!(!parse_flag("maybe", false));
    }
}
