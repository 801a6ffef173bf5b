//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! intake gateway. All types derive Serde traits for deserialization
//! from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the intake gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct IntakeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Cross-origin allow-list for the intake endpoints.
    pub cors: CorsConfig,

    /// Per-client rate-limit windows.
    pub rate_limits: RateLimitsConfig,

    /// Geolocation lookup settings for language detection.
    pub geo: GeoConfig,

    /// Counter/blob store settings.
    pub storage: StorageConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Admin review surface settings.
    pub admin: AdminConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Cross-origin policy for the browser-facing endpoints.
///
/// Disallowed origins are answered with the first allow-listed origin,
/// never a reflection of the caller.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CorsConfig {
    /// Exact origins permitted to call the intake endpoints.
    pub allowed_origins: Vec<String>,

    /// Optional suffix (e.g., ".preview.example.app") admitting preview
    /// deployments over https in addition to the exact list.
    pub preview_origin_suffix: Option<String>,
}

/// Per-client rate-limit windows.
///
/// The thresholds are product decisions; the defaults are the shipped
/// numbers and should not be re-tuned without direction.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitsConfig {
    /// Accepted submission attempts per client hash per window.
    pub submission_max_attempts: u64,

    /// Submission window length in seconds.
    pub submission_window_secs: u64,

    /// Accepted upload attempts per client hash per window.
    pub upload_max_attempts: u64,

    /// Upload window length in seconds.
    pub upload_window_secs: u64,
}

impl Default for RateLimitsConfig {
    fn default() -> Self {
        Self {
            submission_max_attempts: 5,
            submission_window_secs: 3600,
            upload_max_attempts: 10,
            upload_window_secs: 600,
        }
    }
}

/// Geolocation lookup settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeoConfig {
    /// Lookup endpoint; the client address is appended as a path segment.
    pub endpoint: String,

    /// Country code mapped to the primary language.
    pub anchor_country: String,

    /// Language returned for the anchor country and on fallback.
    pub primary_language: String,

    /// Language returned for every other detected country.
    pub secondary_language: String,

    /// Upper bound on the outbound lookup, in milliseconds.
    pub lookup_timeout_ms: u64,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://ip-api.com/json".to_string(),
            anchor_country: "BR".to_string(),
            primary_language: "pt".to_string(),
            secondary_language: "es".to_string(),
            lookup_timeout_ms: 3000,
        }
    }
}

/// Counter and blob store settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Shared atomic counter store. When set, both rate-limit windows are
    /// enforced across instances; when unset, counters are process-local
    /// and best-effort.
    pub redis_url: Option<String>,

    /// Prefix under which accepted attachments are stored.
    pub blob_prefix: String,

    /// Lifetime of signed download tokens issued to reviewers, seconds.
    pub signed_url_ttl_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            blob_prefix: "submissions".to_string(),
            signed_url_ttl_secs: 3600,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Admin review surface configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Mount the `/admin` routes.
    pub enabled: bool,

    /// Admin API key (Bearer token).
    pub api_key: String,

    /// Additional keys granted the reviewer role.
    pub reviewer_keys: Vec<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            // WARNING: This is a placeholder! Change this in production.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
            reviewer_keys: Vec::new(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
