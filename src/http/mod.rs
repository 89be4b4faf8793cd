//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, trace + timeout layers)
//!     → middleware/gate.rs (bypass check, admission pipeline)
//!         → request.rs (extract user agent, client address, path)
//!         → response.rs (403 / 429 / 404 on rejection)
//!     → server.rs forwarder → upstream host application
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use server::{HttpServer, ServerError};
