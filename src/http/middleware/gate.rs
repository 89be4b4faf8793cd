//! Gate middleware.
//!
//! Runs the admission pipeline for every request that is not a bypassed
//! static asset. Admitted requests continue down the stack unmodified.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::http::request::request_facts;
use crate::http::response::rejection_response;
use crate::observability::metrics;
use crate::security::{Gate, Verdict};

pub async fn gate_middleware(
    State(gate): State<Arc<Gate>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if gate.bypasses(request.uri().path()) {
        gate.stats().record_bypass();
        metrics::record_decision("bypassed");
        return next.run(request).await;
    }

    let verdict = {
        let facts = request_facts(&request);
        let verdict = gate.evaluate(&facts);
        if let Verdict::Reject(rejection) = verdict {
            tracing::warn!(
                client = %facts.client,
                path = %facts.path,
                user_agent = %facts.user_agent,
                outcome = rejection.outcome(),
                "Request rejected"
            );
        }
        verdict
    };

    match verdict {
        Verdict::Forward => {
            metrics::record_decision("forwarded");
            next.run(request).await
        }
        Verdict::Reject(rejection) => {
            metrics::record_decision(rejection.outcome());
            rejection_response(rejection, &gate.policy().rate_limit_message)
        }
    }
}
