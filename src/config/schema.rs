//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gate.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the edge gate.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EdgeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Host application that admitted requests are forwarded to.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Client signature classifier.
    pub classifier: ClassifierConfig,

    /// Rate limiting configuration.
    pub rate_limit: RateLimitConfig,

    /// Sensitive path filter.
    pub path_filter: PathFilterConfig,

    /// Static assets that skip the gate entirely.
    pub bypass: BypassConfig,

    /// Remote backend API (token verification, analytics, content listing).
    pub backend_api: BackendApiConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    pub admin: AdminConfig,
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

/// Upstream (host application) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Upstream address (e.g., "127.0.0.1:3000").
    pub address: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
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

/// Signature classifier configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// User-Agent fragments of automated clients (matched case-insensitively).
    pub blocked_agents: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            blocked_agents: [
                "HTTrack",
                "wget",
                "curl",
                "python-requests",
                "scrapy",
                "Go-http-client",
                "Java/",
                "libwww-perl",
                "Mechanize",
                "PhantomJS",
                "HeadlessChrome",
                "Puppeteer",
                "Selenium",
                "SiteCloner",
                "WebCopier",
                "WebZIP",
                "Teleport",
                "LinksCrawler",
                "Offline Explorer",
                "httpx",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// What to do with requests whose client address cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnattributedPolicy {
    /// All unresolved clients share the sentinel bucket (fail-open).
    #[default]
    Shared,
    /// Unresolved clients are rejected on rate-limited paths (fail-closed).
    Reject,
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting.
    pub enabled: bool,

    /// Fixed window length in milliseconds.
    pub window_ms: u64,

    /// Requests admitted per client address per window.
    pub max_requests: u32,

    /// Path prefixes subject to rate limiting.
    pub limited_prefixes: Vec<String>,

    /// Message returned in the 429 JSON body.
    pub message: String,

    pub unattributed: UnattributedPolicy,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_ms: 60_000,
            max_requests: 60,
            limited_prefixes: vec!["/api/".to_string(), "/_next/".to_string()],
            message: "요청이 너무 많습니다. 잠시 후 다시 시도해주세요.".to_string(),
            unattributed: UnattributedPolicy::Shared,
        }
    }
}

/// Sensitive path filter configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathFilterConfig {
    /// Path fragments answered with 404 wherever they appear.
    pub sensitive_paths: Vec<String>,
}

impl Default for PathFilterConfig {
    fn default() -> Self {
        Self {
            sensitive_paths: [".env", ".git", "wp-admin", "wp-login", ".php"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Static asset bypass configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BypassConfig {
    /// Path prefixes forwarded without evaluation.
    pub prefixes: Vec<String>,

    /// File extensions (without the dot) forwarded without evaluation.
    pub extensions: Vec<String>,
}

impl Default for BypassConfig {
    fn default() -> Self {
        Self {
            prefixes: ["/_next/static", "/_next/image", "/favicon.ico", "/logo.png", "/icon-v2.png"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            extensions: ["svg", "png", "jpg", "jpeg", "gif", "webp", "ico"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendApiConfig {
    /// Base URL of the backend API.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    pub verify_path: String,
    pub analytics_path: String,
    pub articles_path: String,
    pub lawyers_path: String,
}

impl Default for BackendApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 5,
            verify_path: "/api/admin/blog/auth/verify".to_string(),
            analytics_path: "/api/analytics/track".to_string(),
            articles_path: "/api/magazine".to_string(),
            lawyers_path: "/api/public/lawyers".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Full,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable admin API.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,

    /// Admin API bind address.
    pub bind_address: String,

    /// Accept bearer tokens confirmed by the backend verification endpoint.
    ///
    /// When the backend cannot be reached, any bearer token is admitted.
    pub remote_verify: bool,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            // WARNING: This is a placeholder! Change this in production.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
            bind_address: "127.0.0.1:8081".to_string(),
            remote_verify: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config: EdgeConfig = toml::from_str("").unwrap();
        assert_eq!(config.rate_limit.window_ms, 60_000);
        assert_eq!(config.rate_limit.max_requests, 60);
        assert_eq!(config.classifier.blocked_agents.len(), 20);
        assert_eq!(config.rate_limit.unattributed, UnattributedPolicy::Shared);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: EdgeConfig = toml::from_str(
            r#"
            [rate_limit]
            max_requests = 5
            unattributed = "reject"

            [observability]
            log_format = "compact"
            "#,
        )
        .unwrap();
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window_ms, 60_000);
        assert_eq!(config.rate_limit.limited_prefixes, vec!["/api/", "/_next/"]);
        assert_eq!(config.rate_limit.unattributed, UnattributedPolicy::Reject);
        assert_eq!(config.observability.log_format, LogFormat::Compact);
    }
}
