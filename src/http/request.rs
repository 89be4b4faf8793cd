//! Extraction of gate inputs from an incoming request.
//!
//! Missing or non-UTF-8 header values are treated as empty strings.

use axum::body::Body;
use axum::http::{header, HeaderMap, Request};

use crate::security::{ClientAddress, RequestFacts};

/// Declared client identity (`User-Agent`), or `""`.
pub fn user_agent(headers: &HeaderMap) -> &str {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Collect the attributes the gate evaluates.
pub fn request_facts(request: &Request<Body>) -> RequestFacts<'_> {
    RequestFacts {
        user_agent: user_agent(request.headers()),
        client: ClientAddress::from_headers(request.headers()),
        path: request.uri().path(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_facts() {
        let request = Request::builder()
            .uri("/api/ping?x=1")
            .header("User-Agent", "Mozilla/5.0")
            .header("X-Forwarded-For", "10.0.0.1, 10.0.0.2")
            .body(Body::empty())
            .unwrap();

        let facts = request_facts(&request);
        assert_eq!(facts.user_agent, "Mozilla/5.0");
        assert_eq!(facts.client.as_str(), "10.0.0.1");
        assert_eq!(facts.path, "/api/ping");
    }

    #[test]
    fn test_missing_user_agent_is_empty() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        assert_eq!(request_facts(&request).user_agent, "");
    }
}
