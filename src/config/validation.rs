//! Configuration validation.
//!
//! Serde handles syntax; this module checks the values. Validation is a pure
//! function that reports every problem it finds, not just the first.

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::EdgeConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: '{value}' is not a valid URL")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{0} contains an empty pattern")]
    EmptyPattern(&'static str),

    #[error("{field}: prefix '{value}' must start with '/'")]
    RelativePrefix { field: &'static str, value: String },

    #[error("admin.api_key must be set when the admin API is enabled")]
    MissingAdminKey,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    check_address(&mut errors, "upstream.address", &config.upstream.address);

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    if config.rate_limit.window_ms == 0 {
        errors.push(ValidationError::Zero("rate_limit.window_ms"));
    }
    if config.rate_limit.max_requests == 0 {
        errors.push(ValidationError::Zero("rate_limit.max_requests"));
    }

    check_patterns(&mut errors, "classifier.blocked_agents", &config.classifier.blocked_agents);
    check_patterns(&mut errors, "path_filter.sensitive_paths", &config.path_filter.sensitive_paths);
    check_patterns(&mut errors, "bypass.extensions", &config.bypass.extensions);
    check_prefixes(&mut errors, "rate_limit.limited_prefixes", &config.rate_limit.limited_prefixes);
    check_prefixes(&mut errors, "bypass.prefixes", &config.bypass.prefixes);

    if Url::parse(&config.backend_api.base_url).is_err() {
        errors.push(ValidationError::InvalidUrl {
            field: "backend_api.base_url",
            value: config.backend_api.base_url.clone(),
        });
    }

    if config.admin.enabled {
        check_address(&mut errors, "admin.bind_address", &config.admin.bind_address);
        if config.admin.api_key.is_empty() {
            errors.push(ValidationError::MissingAdminKey);
        }
    }

    if config.observability.metrics_enabled {
        check_address(&mut errors, "observability.metrics_address", &config.observability.metrics_address);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_patterns(errors: &mut Vec<ValidationError>, field: &'static str, patterns: &[String]) {
    if patterns.iter().any(|p| p.is_empty()) {
        errors.push(ValidationError::EmptyPattern(field));
    }
}

fn check_prefixes(errors: &mut Vec<ValidationError>, field: &'static str, prefixes: &[String]) {
    for prefix in prefixes {
        if !prefix.starts_with('/') {
            errors.push(ValidationError::RelativePrefix {
                field,
                value: prefix.clone(),
            });
        }
    }
}
