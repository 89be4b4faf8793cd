//! HTTP client for the backend API.
//!
//! Every call degrades instead of failing: verification fails open when the
//! backend is unreachable, analytics errors are logged and dropped, and
//! listings come back empty.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::task::JoinHandle;
use url::Url;

use crate::backend_api::types::{
    AnalyticsEvent, ArticleRecord, BackendApiError, LawyerRecord, TokenVerdict,
};
use crate::config::BackendApiConfig;

#[derive(Debug, Clone)]
pub struct BackendApiClient {
    client: Client,
    verify_url: Url,
    analytics_url: Url,
    articles_url: Url,
    lawyers_url: Url,
}

impl BackendApiClient {
    pub fn new(config: &BackendApiConfig) -> Result<Self, BackendApiError> {
        let base = Url::parse(&config.base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            verify_url: base.join(&config.verify_path)?,
            analytics_url: base.join(&config.analytics_path)?,
            articles_url: base.join(&config.articles_path)?,
            lawyers_url: base.join(&config.lawyers_path)?,
        })
    }

    /// Check a bearer token against the verification endpoint.
    pub async fn verify_token(&self, token: &str) -> TokenVerdict {
        match self
            .client
            .get(self.verify_url.clone())
            .bearer_auth(token)
            .send()
            .await
        {
            Ok(res) if res.status().is_success() => TokenVerdict::Valid,
            Ok(res) => {
                tracing::debug!(status = %res.status(), "Token rejected by backend");
                TokenVerdict::Invalid
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token verification unreachable, allowing provisionally");
                TokenVerdict::Unreachable
            }
        }
    }

    /// Send an analytics event in the background. Failures are logged only.
    pub fn track(&self, event: AnalyticsEvent) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            if let Err(e) = this.try_track(&event).await {
                tracing::warn!(
                    error = %e,
                    lawyer_id = %event.lawyer_id,
                    slug = %event.slug,
                    "Analytics event dropped"
                );
            }
        })
    }

    /// Send an analytics event and report the outcome.
    pub async fn try_track(&self, event: &AnalyticsEvent) -> Result<(), BackendApiError> {
        let res = self
            .client
            .post(self.analytics_url.clone())
            .json(event)
            .send()
            .await?;
        if res.status().is_success() {
            Ok(())
        } else {
            Err(BackendApiError::Status(res.status().as_u16()))
        }
    }

    /// Magazine articles, or an empty list if the backend cannot be read.
    pub async fn list_articles(&self) -> Vec<ArticleRecord> {
        self.list(&self.articles_url).await
    }

    /// Public lawyer profiles with their content, or an empty list.
    pub async fn list_lawyers(&self) -> Vec<LawyerRecord> {
        self.list(&self.lawyers_url).await
    }

    async fn list<T: DeserializeOwned>(&self, url: &Url) -> Vec<T> {
        match self.fetch_json(url).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Content listing unavailable, using empty result");
                Vec::new()
            }
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &Url) -> Result<Vec<T>, BackendApiError> {
        let res = self.client.get(url.clone()).send().await?;
        if !res.status().is_success() {
            return Err(BackendApiError::Status(res.status().as_u16()));
        }
        Ok(res.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_join_base() {
        let mut config = BackendApiConfig::default();
        config.base_url = "http://backend.internal:8000/".into();
        let client = BackendApiClient::new(&config).unwrap();
        assert_eq!(
            client.verify_url.as_str(),
            "http://backend.internal:8000/api/admin/blog/auth/verify"
        );
        assert_eq!(client.lawyers_url.as_str(), "http://backend.internal:8000/api/public/lawyers");
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = BackendApiConfig::default();
        config.base_url = "not a url".into();
        assert!(matches!(BackendApiClient::new(&config), Err(BackendApiError::Url(_))));
    }
}
