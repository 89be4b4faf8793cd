//! Client address resolution.
//!
//! Order: first entry of `X-Forwarded-For`, then `X-Real-IP`, then the
//! unroutable sentinel. Resolution never fails; clients without network
//! metadata share the sentinel bucket.

use axum::http::HeaderMap;

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
pub const X_REAL_IP: &str = "x-real-ip";

/// Address used when no header identifies the client.
pub const UNATTRIBUTED_ADDRESS: &str = "0.0.0.0";

/// Resolved client address used as the rate limit key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddress {
    value: String,
    attributed: bool,
}

impl ClientAddress {
    pub fn unattributed() -> Self {
        Self {
            value: UNATTRIBUTED_ADDRESS.to_string(),
            attributed: false,
        }
    }

    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            attributed: true,
        }
    }

    /// Resolve the client address from request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let forwarded = header_str(headers, X_FORWARDED_FOR)
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        let real_ip = || {
            header_str(headers, X_REAL_IP)
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        match forwarded.or_else(real_ip) {
            Some(addr) => Self::new(addr),
            None => Self::unattributed(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// False when the sentinel address stands in for an unknown client.
    pub fn is_attributed(&self) -> bool {
        self.attributed
    }
}

impl std::fmt::Display for ClientAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
