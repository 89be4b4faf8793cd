//! Request path classification.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → bypass.rs (static asset? forward without evaluation)
//!     → matcher.rs primitives also select rate-limited prefixes
//! ```

pub mod bypass;
pub mod matcher;

pub use bypass::BypassList;
pub use matcher::{AnyMatcher, ExtensionMatcher, Matcher, PathPrefixMatcher};
