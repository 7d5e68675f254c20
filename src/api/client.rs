//! Review backend HTTP client
//!
//! [`ApiClient`] talks to the review backend over HTTP. The store and the
//! connection monitor only see it through the [`ReviewBackend`] and
//! [`HealthProbe`] traits, so either can be driven by another backend.

use crate::api::types::{
    ExpertId, HealthStatus, ProcessModel, Suggestion, SuggestionsResponse, UploadPayload,
    UploadResponse,
};
use crate::config::{endpoints, Config};
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Operations the client state store needs from the backend
#[async_trait]
pub trait ReviewBackend: Send + Sync {
    /// Upload a BPMN file and return the backend's model of it
    ///
    /// A non-success status must fail with [`ClientError::Upload`].
    async fn upload_bpmn(&self, payload: UploadPayload) -> Result<ProcessModel>;

    /// Fetch the suggestion list for one expert
    ///
    /// A non-success status must fail with [`ClientError::Fetch`].
    async fn fetch_suggestions(&self, expert: ExpertId) -> Result<Vec<Suggestion>>;
}

/// A single backend reachability check
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Ask the backend for its status
    async fn health_check(&self) -> Result<HealthStatus>;
}

/// HTTP client for the review backend
///
/// Cloning is cheap: clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from configuration (base URL and request timeout)
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(http, config.api.base_url.clone()))
    }

    /// Build a client around an existing `reqwest::Client`
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// Base URL every endpoint is resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Read a body and decode it as JSON
async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        tracing::debug!(error = %e, body = %body, "Response body did not decode");
        ClientError::InvalidResponse(e.to_string())
    })
}

#[async_trait]
impl ReviewBackend for ApiClient {
    async fn upload_bpmn(&self, payload: UploadPayload) -> Result<ProcessModel> {
        let url = self.url(endpoints::UPLOAD);
        tracing::debug!(
            url = %url,
            file_name = %payload.file_name,
            size = payload.bytes.len(),
            "Uploading BPMN file"
        );

        let form = payload.into_form()?;
        let response = self.http.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                status_code = status.as_u16(),
                "Upload endpoint returned error status"
            );
            return Err(ClientError::Upload);
        }

        let body: UploadResponse = decode_json(response).await?;
        Ok(body.bpmn)
    }

    async fn fetch_suggestions(&self, expert: ExpertId) -> Result<Vec<Suggestion>> {
        let url = format!("{}/{}", self.url(endpoints::SUGGESTIONS), expert.id());
        tracing::debug!(url = %url, expert = %expert.label(), "Fetching expert suggestions");

        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                status_code = status.as_u16(),
                expert = expert.id(),
                "Suggestions endpoint returned error status"
            );
            return Err(ClientError::Fetch);
        }

        let body: SuggestionsResponse = decode_json(response).await?;
        tracing::debug!(
            expert = expert.id(),
            count = body.suggestions.len(),
            "Received expert suggestions"
        );
        Ok(body.suggestions)
    }
}

#[async_trait]
impl HealthProbe for ApiClient {
    async fn health_check(&self) -> Result<HealthStatus> {
        let url = self.url(endpoints::HEALTH_CHECK);
        // Timestamp defeats intermediate caches
        let timestamp = chrono::Utc::now().timestamp_millis();

        let response = self
            .http
            .get(&url)
            .query(&[("timestamp", timestamp)])
            .send()
            .await
            .map_err(|e| ClientError::HealthCheck(e.to_string()))?;

        // The status code is not checked: any body that decodes is reported
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::HealthCheck(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ClientError::HealthCheck(e.to_string()))
    }
}
