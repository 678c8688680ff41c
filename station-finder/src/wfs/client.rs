//! Feature API HTTP client.
//!
//! Issues `GetFeature` requests against an OGC WFS endpoint. The API key
//! travels as the `key` query parameter, so request URLs are never logged
//! and are stripped from transport errors.

use std::num::NonZeroU32;

use tracing::trace;

use super::error::WfsError;
use super::pager::PageSource;
use super::query::FeatureQuery;
use super::types::RawPage;

/// Default WFS endpoint (Ordnance Survey Features API).
pub const DEFAULT_BASE_URL: &str = "https://api.os.uk/features/v1/wfs";

/// Default feature type: railway stations from OS Zoomstack.
pub const DEFAULT_TYPE_NAMES: &str = "Zoomstack_RailwayStations";

/// Default page size (`count`).
pub const DEFAULT_PAGE_SIZE: NonZeroU32 = NonZeroU32::new(100).unwrap();

/// Configuration for the feature API client.
///
/// The API key is not part of the client: it travels in each
/// [`FeatureQuery`].
#[derive(Debug, Clone)]
pub struct WfsConfig {
    /// WFS endpoint URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl WfsConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for WfsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Client for a WFS `GetFeature` endpoint.
#[derive(Debug, Clone)]
pub struct WfsClient {
    http: reqwest::Client,
    base_url: String,
}

impl WfsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: WfsConfig) -> Result<Self, WfsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Build the HTTP request for one page without sending it.
    pub fn build_request(&self, query: &FeatureQuery) -> Result<reqwest::Request, WfsError> {
        Ok(self
            .http
            .get(&self.base_url)
            .query(&query.query_pairs())
            .build()?)
    }

    async fn get_page(&self, query: &FeatureQuery) -> Result<RawPage, WfsError> {
        let request = self.build_request(query)?;
        trace!(start_index = query.start_index(), "sending GetFeature");

        let response = self.http.execute(request).await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(WfsError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WfsError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WfsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| WfsError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl PageSource for WfsClient {
    async fn fetch_page(&self, query: &FeatureQuery) -> Result<RawPage, WfsError> {
        self.get_page(query).await
    }
}
