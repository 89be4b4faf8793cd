//! Rejection responses.
//!
//! Bodies and content types are fixed; only the 429 message is configurable.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::security::Rejection;

pub const ACCESS_DENIED: &str = "Access Denied";
pub const NOT_FOUND: &str = "Not Found";

/// Build the terminal response for a rejection.
pub fn rejection_response(rejection: Rejection, rate_limit_message: &str) -> Response {
    match rejection {
        Rejection::Forbidden => plain_text(StatusCode::FORBIDDEN, ACCESS_DENIED),
        Rejection::TooManyRequests => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": rate_limit_message })),
        )
            .into_response(),
        Rejection::NotFound => plain_text(StatusCode::NOT_FOUND, NOT_FOUND),
    }
}

fn plain_text(status: StatusCode, body: &'static str) -> Response {
    (status, [(header::CONTENT_TYPE, "text/plain")], body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn parts(response: Response) -> (StatusCode, String, String) {
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_forbidden() {
        let (status, content_type, body) = parts(rejection_response(Rejection::Forbidden, "")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(content_type, "text/plain");
        assert_eq!(body, "Access Denied");
    }

    #[tokio::test]
    async fn test_too_many_requests() {
        let (status, content_type, body) =
            parts(rejection_response(Rejection::TooManyRequests, "slow down")).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(content_type, "application/json");
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json, json!({ "error": "slow down" }));
    }

    #[tokio::test]
    async fn test_not_found() {
        let (status, content_type, body) = parts(rejection_response(Rejection::NotFound, "")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(content_type, "text/plain");
        assert_eq!(body, "Not Found");
    }
}
