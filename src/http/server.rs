//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router: gate middleware in front of the forwarder
//! - Forward admitted requests to the upstream unmodified
//! - Run the rate table sweeper and the admin listener
//! - Apply configuration reloads to the gate policy

use axum::{
    body::Body,
    extract::State,
    http::{
        uri::{Authority, PathAndQuery, Scheme},
        Request, StatusCode, Uri,
    },
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::admin::{setup_admin_router, AdminState};
use crate::backend_api::{BackendApiClient, BackendApiError};
use crate::config::EdgeConfig;
use crate::http::middleware::gate_middleware;
use crate::observability::metrics;
use crate::security::{Clock, FixedWindowLimiter, Gate, GatePolicy, RateTableSweeper, SystemClock};

/// Errors raised while building the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid upstream address '{0}'")]
    InvalidUpstream(String),

    #[error("backend API client: {0}")]
    BackendApi(#[from] BackendApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// State injected into the forwarding handler.
#[derive(Clone)]
pub struct AppState {
    pub client: Client<HttpConnector, Body>,
    pub upstream: Authority,
}

/// HTTP server for the edge gate.
pub struct HttpServer {
    router: Router,
    config: EdgeConfig,
    gate: Arc<Gate>,
    limiter: Arc<FixedWindowLimiter>,
    clock: Arc<dyn Clock>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: EdgeConfig) -> Result<Self, ServerError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a server whose rate limiter reads time from `clock`.
    pub fn with_clock(config: EdgeConfig, clock: Arc<dyn Clock>) -> Result<Self, ServerError> {
        let upstream: Authority = config
            .upstream
            .address
            .parse()
            .map_err(|_| ServerError::InvalidUpstream(config.upstream.address.clone()))?;

        let limiter = Arc::new(FixedWindowLimiter::from_config(&config.rate_limit));
        let gate = Arc::new(Gate::new(
            GatePolicy::from_config(&config),
            limiter.clone(),
            clock.clone(),
        ));

        let state = AppState {
            client: Client::builder(TokioExecutor::new()).build(HttpConnector::new()),
            upstream,
        };

        let router = Self::build_router(&config, state, gate.clone());
        Ok(Self {
            router,
            config,
            gate,
            limiter,
            clock,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &EdgeConfig, state: AppState, gate: Arc<Gate>) -> Router {
        Router::new()
            .fallback(forward_handler)
            .with_state(state)
            .layer(middleware::from_fn_with_state(gate, gate_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    pub fn gate(&self) -> Arc<Gate> {
        self.gate.clone()
    }

    pub fn config(&self) -> &EdgeConfig {
        &self.config
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        config_updates: mpsc::UnboundedReceiver<EdgeConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.address,
            "HTTP server starting"
        );

        let sweeper = RateTableSweeper::new(self.limiter.clone(), self.clock.clone());
        tokio::spawn(sweeper.run(shutdown.resubscribe()));

        tokio::spawn(apply_config_updates(
            self.gate.clone(),
            self.limiter.clone(),
            config_updates,
        ));

        if self.config.admin.enabled {
            self.spawn_admin(shutdown.resubscribe())?;
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    fn spawn_admin(&self, mut shutdown: broadcast::Receiver<()>) -> Result<(), ServerError> {
        let verifier = if self.config.admin.remote_verify {
            Some(BackendApiClient::new(&self.config.backend_api)?)
        } else {
            None
        };

        let router = setup_admin_router(AdminState {
            gate: self.gate.clone(),
            limiter: self.limiter.clone(),
            api_key: self.config.admin.api_key.clone(),
            verifier,
        });
        let bind_address = self.config.admin.bind_address.clone();

        tokio::spawn(async move {
            let listener = match TcpListener::bind(&bind_address).await {
                Ok(l) => l,
                Err(e) => {
                    tracing::error!(address = %bind_address, error = %e, "Failed to bind admin listener");
                    return;
                }
            };
            tracing::info!(address = %bind_address, "Admin API listening");

            let result = axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = shutdown.recv().await;
                })
                .await;
            if let Err(e) = result {
                tracing::error!(error = %e, "Admin API stopped with error");
            }
        });
        Ok(())
    }
}

/// Swap the gate policy whenever a validated config arrives.
async fn apply_config_updates(
    gate: Arc<Gate>,
    limiter: Arc<FixedWindowLimiter>,
    mut updates: mpsc::UnboundedReceiver<EdgeConfig>,
) {
    while let Some(config) = updates.recv().await {
        let window = Duration::from_millis(config.rate_limit.window_ms);
        if window != limiter.window() || config.rate_limit.max_requests != limiter.budget() {
            tracing::warn!(
                window_ms = config.rate_limit.window_ms,
                max_requests = config.rate_limit.max_requests,
                "Rate window and budget changes need a restart; keeping current values"
            );
        }
        gate.replace_policy(GatePolicy::from_config(&config));
        tracing::info!("Gate policy reloaded");
    }
}

/// Forward an admitted request to the upstream.
async fn forward_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let (mut parts, body) = request.into_parts();

    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(state.upstream.clone());
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    parts.uri = match Uri::from_parts(uri_parts) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build upstream URI");
            return (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response();
        }
    };

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            metrics::record_upstream(response.status().as_u16(), start_time);
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(upstream = %state.upstream, error = %e, "Upstream error");
            metrics::record_upstream(502, start_time);
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}
