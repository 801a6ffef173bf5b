//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (windows > 0, addresses parse)
//! - Check the CORS allow-list is usable as a fallback origin
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: IntakeConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::IntakeConfig;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    BindAddress(String),

    #[error("cors.allowed_origins must list at least one origin")]
    EmptyOriginList,

    #[error("cors origin '{0}' must be an absolute http(s) origin")]
    MalformedOrigin(String),

    #[error("rate_limits.{0} must be greater than zero")]
    ZeroRateLimit(&'static str),

    #[error("geo.endpoint '{0}' is not a valid URL")]
    GeoEndpoint(String),

    #[error("storage.signed_url_ttl_secs must be greater than zero")]
    ZeroSignedUrlTtl,

    #[error("admin.api_key must be set when the admin surface is enabled")]
    MissingAdminKey,
}

/// Check every semantic constraint, collecting all violations.
pub fn validate_config(config: &IntakeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.cors.allowed_origins.is_empty() {
        errors.push(ValidationError::EmptyOriginList);
    }
    for origin in &config.cors.allowed_origins {
        let scheme_ok = origin.starts_with("http://") || origin.starts_with("https://");
        if !scheme_ok || Url::parse(origin).is_err() {
            errors.push(ValidationError::MalformedOrigin(origin.clone()));
        }
    }

    let limits = &config.rate_limits;
    for (value, field) in [
        (limits.submission_max_attempts, "submission_max_attempts"),
        (limits.submission_window_secs, "submission_window_secs"),
        (limits.upload_max_attempts, "upload_max_attempts"),
        (limits.upload_window_secs, "upload_window_secs"),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroRateLimit(field));
        }
    }

    if Url::parse(&config.geo.endpoint).is_err() {
        errors.push(ValidationError::GeoEndpoint(config.geo.endpoint.clone()));
    }

    if config.storage.signed_url_ttl_secs == 0 {
        errors.push(ValidationError::ZeroSignedUrlTtl);
    }

    if config.admin.enabled && config.admin.api_key.trim().is_empty() {
        errors.push(ValidationError::MissingAdminKey);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> IntakeConfig {
        let mut config = IntakeConfig::default();
        config
            .cors
            .allowed_origins
            .push("https://awards.example.com".to_string());
        config
    }

    #[test]
    fn accepts_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn rejects_empty_origin_list() {
        let config = IntakeConfig::default();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::EmptyOriginList)));
    }

    #[test]
    fn collects_multiple_errors() {
        let mut config = valid_config();
        config.listener.bind_address = "not-an-address".to_string();
        config.rate_limits.submission_max_attempts = 0;
        config.rate_limits.upload_window_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn rejects_origin_without_scheme() {
        let mut config = valid_config();
        config.cors.allowed_origins.push("awards.example.com".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::MalformedOrigin(_))));
    }

    #[test]
    fn enabled_admin_requires_key() {
        let mut config = valid_config();
        config.admin.enabled = true;
        config.admin.api_key = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::MissingAdminKey)));
    }
}
