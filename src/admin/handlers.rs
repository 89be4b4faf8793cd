use axum::{extract::State, Json};
use serde::Serialize;

use crate::admin::AdminState;
use crate::config::UnattributedPolicy;
use crate::security::rate_limit::RateTableSummary;
use crate::security::GateStatsSnapshot;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct PolicySummary {
    pub blocked_agents: Vec<String>,
    pub sensitive_paths: Vec<String>,
    pub rate_limit_enabled: bool,
    pub rate_limited_prefixes: Vec<String>,
    pub unattributed: UnattributedPolicy,
}

pub async fn get_status() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

pub async fn get_stats(State(state): State<AdminState>) -> Json<GateStatsSnapshot> {
    Json(state.gate.stats().snapshot())
}

pub async fn get_rate_table(State(state): State<AdminState>) -> Json<RateTableSummary> {
    Json(state.limiter.summary())
}

pub async fn get_policy(State(state): State<AdminState>) -> Json<PolicySummary> {
    let policy = state.gate.policy();
    Json(PolicySummary {
        blocked_agents: policy.signatures.patterns().to_vec(),
        sensitive_paths: policy.sensitive_paths.patterns().to_vec(),
        rate_limit_enabled: policy.rate_limit_enabled,
        rate_limited_prefixes: policy.rate_limited_prefixes.clone(),
        unattributed: policy.unattributed,
    })
}
