//! Tracing Subscriber Initialization
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a JSON
//! (or human-readable) formatter.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::parse_flag;
use crate::error::{ApiError, ApiResult};

const DEFAULT_FILTER: &str = "headcount_api=debug,tower_http=debug,info";

/// Telemetry configuration from environment variables.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to the startup log
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (production, staging, development)
    pub environment: String,
    /// Emit JSON log lines instead of pretty text
    pub log_json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "headcount-api".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
            log_json: true,
        }
    }
}

impl TelemetryConfig {
    /// - `HEADCOUNT_SERVICE_NAME` (default: headcount-api)
    /// - `HEADCOUNT_SERVICE_VERSION` (default: crate version)
    /// - `HEADCOUNT_ENVIRONMENT` (default: development)
    /// - `HEADCOUNT_LOG_JSON` (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            service_name: lookup("HEADCOUNT_SERVICE_NAME").unwrap_or(defaults.service_name),
            service_version: lookup("HEADCOUNT_SERVICE_VERSION")
                .unwrap_or(defaults.service_version),
            environment: lookup("HEADCOUNT_ENVIRONMENT").unwrap_or(defaults.environment),
            log_json: lookup("HEADCOUNT_LOG_JSON")
                .map(|s| parse_flag(&s, true))
                .unwrap_or(defaults.log_json),
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Call once at startup. `RUST_LOG` overrides the default filter.
pub fn init_tracing(config: &TelemetryConfig) -> ApiResult<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if config.log_json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().pretty()).try_init()
    };
    installed.map_err(|e| ApiError::internal_error(format!("Failed to init subscriber: {}", e)))?;

    tracing::info!(
        service_name = config.service_name,
        service_version = config.service_version,
        environment = config.environment,
        log_json = config.log_json,
        "Telemetry initialized"
    );

    Ok(())
}
