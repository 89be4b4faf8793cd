//! Edge request gate library.
//!
//! An admission-control reverse proxy: every inbound request is classified
//! by client signature, rate limited per client address on API paths, and
//! checked against sensitive path fragments before it reaches the host
//! application.

pub mod admin;
pub mod backend_api;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::EdgeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
