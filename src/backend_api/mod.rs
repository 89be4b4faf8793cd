//! Backend API collaborators.
//!
//! # Data Flow
//! ```text
//! admin auth      → verify_token   → GET  {verify_path}    (Bearer)
//! page tracking   → track          → POST {analytics_path} (fire-and-forget)
//! feed generation → list_articles  → GET  {articles_path}
//!                 → list_lawyers   → GET  {lawyers_path}
//! ```

pub mod client;
pub mod types;

pub use client::BackendApiClient;
pub use types::{
    AnalyticsEvent, ArticleRecord, BackendApiError, ContentItem, EventType, LawyerRecord,
    TokenVerdict,
};
