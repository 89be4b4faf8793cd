//! Admin API: gate statistics and active policy.

pub mod auth;
pub mod handlers;

use axum::{middleware, routing::get, Router};
use std::sync::Arc;

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::backend_api::BackendApiClient;
use crate::security::{FixedWindowLimiter, Gate};

/// State shared by admin handlers and the auth middleware.
#[derive(Clone)]
pub struct AdminState {
    pub gate: Arc<Gate>,
    pub limiter: Arc<FixedWindowLimiter>,
    pub api_key: String,
    /// Set when bearer tokens may also be confirmed by the backend.
    pub verifier: Option<BackendApiClient>,
}

pub fn setup_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/stats", get(get_stats))
        .route("/admin/rate-table", get(get_rate_table))
        .route("/admin/policy", get(get_policy))
        .layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware))
        .with_state(state)
}
