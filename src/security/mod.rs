//! Security subsystem: the inbound request gate.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → client_addr.rs (resolve client address from headers)
//!     → gate.rs
//!         → signature.rs (automation fingerprints → 403)
//!         → rate_limit.rs (per-address fixed window → 429)
//!         → path_filter.rs (sensitive resources → 404)
//!     → Forward to upstream
//!
//! Background:
//!     sweeper.rs drops idle rate table entries once per window
//! ```
//!
//! # Design Decisions
//! - Policies are pure predicates; only the counter holds state
//! - Fail open on missing client metadata (configurable)
//! - Rejected requests still count toward the window

pub mod client_addr;
pub mod clock;
pub mod gate;
pub mod path_filter;
pub mod rate_limit;
pub mod signature;
pub mod sweeper;

pub use client_addr::ClientAddress;
pub use clock::{Clock, ManualClock, SystemClock};
pub use gate::{Gate, GatePolicy, GateStatsSnapshot, Rejection, RequestFacts, Verdict};
pub use path_filter::SensitivePathSet;
pub use rate_limit::{FixedWindowLimiter, RateWindowEntry, RequestCounter};
pub use signature::ClientSignatureSet;
pub use sweeper::RateTableSweeper;
