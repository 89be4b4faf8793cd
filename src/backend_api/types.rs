//! Backend API records and errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of a remote token verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenVerdict {
    /// The backend accepted the token.
    Valid,
    /// The backend answered with a non-success status.
    Invalid,
    /// No response from the backend.
    Unreachable,
}

impl TokenVerdict {
    /// An unreachable verifier is treated as provisionally authorized.
    pub fn is_authorized(&self) -> bool {
        !matches!(self, TokenVerdict::Invalid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    View,
    Click,
    Conversion,
    Dwell,
}

/// Analytics beacon payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub lawyer_id: String,
    pub slug: String,
    pub event_type: EventType,
    /// 1 for views, clicks and conversions; seconds for dwell time.
    pub value: f64,
}

impl AnalyticsEvent {
    pub fn view(lawyer_id: impl Into<String>, slug: impl Into<String>) -> Self {
        Self::counted(lawyer_id, slug, EventType::View)
    }

    pub fn click(lawyer_id: impl Into<String>, slug: impl Into<String>) -> Self {
        Self::counted(lawyer_id, slug, EventType::Click)
    }

    /// Consultation request from a lawyer's page.
    pub fn conversion(lawyer_id: impl Into<String>, slug: impl Into<String>) -> Self {
        Self::counted(lawyer_id, slug, EventType::Conversion)
    }

    fn counted(lawyer_id: impl Into<String>, slug: impl Into<String>, event_type: EventType) -> Self {
        Self {
            lawyer_id: lawyer_id.into(),
            slug: slug.into(),
            event_type,
            value: 1.0,
        }
    }

    pub fn dwell(lawyer_id: impl Into<String>, slug: impl Into<String>, seconds: f64) -> Self {
        Self {
            lawyer_id: lawyer_id.into(),
            slug: slug.into(),
            event_type: EventType::Dwell,
            value: seconds,
        }
    }
}

/// Magazine article listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub lawyer_name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Content item published by a lawyer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub date: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Public lawyer listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LawyerRecord {
    pub id: String,
    #[serde(default)]
    pub content_items: Vec<ContentItem>,
}

/// Errors from backend API calls.
#[derive(Debug, Error)]
pub enum BackendApiError {
    #[error("invalid backend URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("backend returned status {0}")]
    Status(u16),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_invalid_is_unauthorized() {
        assert!(TokenVerdict::Valid.is_authorized());
        assert!(TokenVerdict::Unreachable.is_authorized());
        assert!(!TokenVerdict::Invalid.is_authorized());
    }

    #[test]
    fn test_analytics_event_wire_format() {
        let json = serde_json::to_value(AnalyticsEvent::dwell("7", "first-post", 12.5)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "lawyer_id": "7",
                "slug": "first-post",
                "event_type": "dwell",
                "value": 12.5
            })
        );
    }

    #[test]
    fn test_counted_event_types_on_the_wire() {
        let conversion = serde_json::to_value(AnalyticsEvent::conversion("7", "consult")).unwrap();
        assert_eq!(conversion["event_type"], "conversion");
        assert_eq!(conversion["value"], 1.0);
        assert_eq!(
            serde_json::to_value(AnalyticsEvent::click("7", "consult")).unwrap()["event_type"],
            "click"
        );

        let parsed: AnalyticsEvent = serde_json::from_str(
            r#"{"lawyer_id":"7","slug":"consult","event_type":"conversion","value":1}"#,
        )
        .unwrap();
        assert_eq!(parsed, AnalyticsEvent::conversion("7", "consult"));
        assert!(serde_json::from_str::<AnalyticsEvent>(
            r#"{"lawyer_id":"7","slug":"consult","event_type":"share","value":1}"#
        )
        .is_err());
    }

    #[test]
    fn test_lawyer_record_tolerates_missing_fields() {
        let lawyers: Vec<LawyerRecord> = serde_json::from_str(
            r#"[{"id": "1"}, {"id": "2", "content_items": [{"id": "9", "date": "2024-05-01", "type": "blog"}]}]"#,
        )
        .unwrap();
        assert!(lawyers[0].content_items.is_empty());
        assert_eq!(lawyers[1].content_items[0].kind.as_deref(), Some("blog"));
        assert_eq!(lawyers[1].content_items[0].slug, None);
    }
}
