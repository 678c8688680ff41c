//! Per-page request descriptor for the feature API.

use std::fmt;
use std::num::NonZeroU32;

/// WFS service identifier.
pub const SERVICE: &str = "WFS";
/// WFS request kind.
pub const REQUEST: &str = "GetFeature";
/// WFS protocol version.
pub const VERSION: &str = "2.0.0";
/// Output encoding requested from the API.
pub const OUTPUT_FORMAT: &str = "GEOJSON";

/// Parameter set for one `GetFeature` page request.
///
/// Built fresh for each fetch session with `start_index` at zero. The
/// pager owns the query for the session and is the only thing that
/// advances it.
#[derive(Clone, PartialEq)]
pub struct FeatureQuery {
    api_key: String,
    type_names: String,
    filter: String,
    page_size: NonZeroU32,
    start_index: u64,
}

impl FeatureQuery {
    pub fn new(
        api_key: impl Into<String>,
        type_names: impl Into<String>,
        filter: impl Into<String>,
        page_size: NonZeroU32,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            type_names: type_names.into(),
            filter: filter.into(),
            page_size,
            start_index: 0,
        }
    }

    pub fn type_names(&self) -> &str {
        &self.type_names
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Requested page size (`count`).
    pub fn page_size(&self) -> u32 {
        self.page_size.get()
    }

    /// Current offset (`startIndex`).
    pub fn start_index(&self) -> u64 {
        self.start_index
    }

    /// Move the offset forward by one page.
    pub fn advance(&mut self) {
        self.start_index = self
            .start_index
            .saturating_add(u64::from(self.page_size.get()));
    }

    /// Query parameters in the order the API documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("key", self.api_key.clone()),
            ("typeNames", self.type_names.clone()),
            ("filter", self.filter.clone()),
            ("service", SERVICE.to_string()),
            ("request", REQUEST.to_string()),
            ("version", VERSION.to_string()),
            ("outputFormat", OUTPUT_FORMAT.to_string()),
            ("count", self.page_size.to_string()),
            ("startIndex", self.start_index.to_string()),
        ]
    }
}

impl fmt::Debug for FeatureQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureQuery")
            .field("api_key", &"<redacted>")
            .field("type_names", &self.type_names)
            .field("filter_len", &self.filter.len())
            .field("page_size", &self.page_size)
            .field("start_index", &self.start_index)
            .finish()
    }
}
