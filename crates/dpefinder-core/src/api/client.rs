//! HTTP client for the FAA designee registry.
//!
//! The registry exposes a single search endpoint; [`RegistryClient`] posts a
//! bulk [`SearchQuery`] to it and hands back the raw body so the caller can
//! both validate it and store it verbatim.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Url};
use tracing::debug;

use super::ApiError;
use crate::models::SearchQuery;

// ============================================================================
// Constants
// ============================================================================

/// Base URL for the designee registry API
pub const DEFAULT_BASE_URL: &str = "https://designee.faa.gov/designeeapi/api";

/// Path of the bulk search endpoint, relative to the base URL
const SEARCH_PATH: &str = "Cloa/Search/";

/// HTTP request timeout in seconds.
/// A full examiner category is a few megabytes of JSON.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Source of registry search results.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Submit a search and return the raw response body.
    async fn search(&self, query: &SearchQuery) -> Result<String, ApiError>;
}

/// API client for the designee registry.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct RegistryClient {
    client: Client,
    search_url: Url,
}

impl RegistryClient {
    /// Create a client for the public registry with the default timeout
    pub fn new() -> Result<Self, ApiError> {
        Self::with_options(DEFAULT_BASE_URL, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Create a client for an arbitrary registry base URL
    pub fn with_options(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;

        // Url::join drops the last path segment unless the base ends with '/'
        let base = format!("{}/", base_url.trim_end_matches('/'));
        let search_url = Url::parse(&base)
            .and_then(|base| base.join(SEARCH_PATH))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        Ok(Self { client, search_url })
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }
}

#[async_trait]
impl RemoteSource for RegistryClient {
    async fn search(&self, query: &SearchQuery) -> Result<String, ApiError> {
        debug!(
            url = %self.search_url,
            designee_type = query.designee_type_id,
            rows = query.page_model.rows,
            "Submitting designee search"
        );

        let response = self
            .client
            .post(self.search_url.clone())
            .header(header::ACCEPT, "application/json")
            .json(query)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let body = response.text().await?;
        debug!(bytes = body.len(), "Designee search response received");
        Ok(body)
    }
}
