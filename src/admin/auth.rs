use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::admin::AdminState;

/// Bearer authentication for the admin API.
///
/// The static key always works. Other tokens are sent to the backend
/// verifier when one is configured; an unreachable verifier admits.
pub async fn admin_auth_middleware(
    State(state): State<AdminState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if token == state.api_key {
        return Ok(next.run(request).await);
    }

    if let Some(verifier) = &state.verifier {
        let verdict = verifier.verify_token(&token).await;
        if verdict.is_authorized() {
            tracing::debug!(?verdict, "Admin token accepted by backend verifier");
            return Ok(next.run(request).await);
        }
    }

    Err(StatusCode::UNAUTHORIZED)
}
