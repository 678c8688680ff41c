//! Mock feature API for development without an API key.
//!
//! Loads a GeoJSON feature collection from disk and serves it page by page
//! as if it were the live API.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use super::error::WfsError;
use super::pager::PageSource;
use super::query::FeatureQuery;
use super::types::{RawFeature, RawPage};

/// Mock client that pages through a fixed feature list.
///
/// The spatial filter is ignored: every query sees the whole list.
#[derive(Debug, Clone)]
pub struct MockWfsClient {
    features: Arc<[RawFeature]>,
    requests: Arc<AtomicU32>,
}

impl MockWfsClient {
    pub fn new(features: Vec<RawFeature>) -> Self {
        Self {
            features: features.into(),
            requests: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Load features from a GeoJSON file with a top-level `features` array.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, WfsError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| WfsError::Api {
            status: 0,
            message: format!("Failed to read {:?}: {}", path, e),
        })?;

        let page: RawPage = serde_json::from_str(&json).map_err(|e| WfsError::Json {
            message: format!("Failed to parse {:?}: {}", path, e),
            body: None,
        })?;

        Ok(Self::new(page.features))
    }

    /// Number of features available.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Number of page requests served so far.
    pub fn request_count(&self) -> u32 {
        self.requests.load(Ordering::Relaxed)
    }

    fn page(&self, query: &FeatureQuery) -> RawPage {
        let total = self.features.len();
        let start = usize::try_from(query.start_index())
            .unwrap_or(usize::MAX)
            .min(total);
        let end = start.saturating_add(query.page_size() as usize).min(total);
        let features = self.features[start..end].to_vec();

        RawPage {
            number_returned: Some(features.len() as u64),
            number_matched: Some(total as u64),
            features,
        }
    }
}

impl PageSource for MockWfsClient {
    async fn fetch_page(&self, query: &FeatureQuery) -> Result<RawPage, WfsError> {
        self.requests.fetch_add(1, Ordering::Relaxed);
        Ok(self.page(query))
    }
}
