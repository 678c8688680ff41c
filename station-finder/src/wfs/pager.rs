//! Paged fetch-and-accumulate loop.
//!
//! The remote API does not say up front how many pages a query has. Pages
//! are requested one at a time at increasing offsets until a page comes
//! back shorter than the requested size, or a safety limit is reached.

use std::fmt;
use std::future::Future;

use serde::Serialize;
use tracing::{debug, warn};

use super::error::WfsError;
use super::query::FeatureQuery;
use super::types::{RawFeature, RawPage};

/// Default maximum number of page requests per session.
pub const DEFAULT_MAX_PAGES: u32 = 100;

/// Default maximum number of accumulated features per session.
pub const DEFAULT_MAX_FEATURES: u64 = 10_000;

/// Anything that can answer a single page request.
///
/// Implemented by the HTTP client and by the file-backed mock.
pub trait PageSource {
    /// Fetch the page described by `query` (its `start_index` and `page_size`).
    fn fetch_page(
        &self,
        query: &FeatureQuery,
    ) -> impl Future<Output = Result<RawPage, WfsError>> + Send;
}

/// Safety bounds for one fetch session.
///
/// At least one page is always requested, whatever the limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchLimits {
    pub max_pages: u32,
    pub max_features: u64,
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

/// Why a fetch session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// A short page was returned.
    Exhausted,
    /// `max_pages` requests were made, all returning full pages.
    PageLimit,
    /// At least `max_features` features were accumulated.
    FeatureLimit,
}

impl Termination {
    /// Whether the session stopped on a safety limit rather than a short page.
    pub fn is_limit(&self) -> bool {
        !matches!(self, Termination::Exhausted)
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Exhausted => f.write_str("exhausted"),
            Termination::PageLimit => f.write_str("page limit reached"),
            Termination::FeatureLimit => f.write_str("feature limit reached"),
        }
    }
}

/// Result of a completed fetch session.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Every feature from every page, in arrival order.
    pub features: Vec<RawFeature>,
    /// Number of page requests made.
    pub pages: u32,
    pub termination: Termination,
    /// Last `numberMatched` reported by the server, if any.
    pub number_matched: Option<u64>,
}

/// Fetch every page for `query`, starting at its current offset.
///
/// Requests are strictly sequential: the decision to request the next page
/// depends on the size of the previous one. Any failed page aborts the
/// session; features from earlier pages are discarded.
pub async fn fetch_all<S>(
    source: &S,
    mut query: FeatureQuery,
    limits: FetchLimits,
) -> Result<FetchOutcome, WfsError>
where
    S: PageSource + Sync,
{
    let page_size = query.page_size() as usize;
    let mut features: Vec<RawFeature> = Vec::new();
    let mut pages: u32 = 0;
    let mut number_matched = None;

    let termination = loop {
        let page = source.fetch_page(&query).await?;
        pages += 1;

        let returned = page.features.len();
        if page.number_matched.is_some() {
            number_matched = page.number_matched;
        }
        features.extend(page.features);

        debug!(
            page = pages,
            start_index = query.start_index(),
            returned,
            total = features.len(),
            "fetched page"
        );

        if returned < page_size {
            break Termination::Exhausted;
        }
        if pages >= limits.max_pages {
            break Termination::PageLimit;
        }
        if features.len() as u64 >= limits.max_features {
            break Termination::FeatureLimit;
        }

        query.advance();
    };

    // TODO: request the missing range when numberMatched disagrees, once the
    // OS API is confirmed to report it for filtered queries.
    if termination == Termination::Exhausted
        && let Some(matched) = number_matched
        && (features.len() as u64) < matched
    {
        warn!(
            matched,
            fetched = features.len(),
            "short page before numberMatched was reached"
        );
    }

    Ok(FetchOutcome {
        features,
        pages,
        termination,
        number_matched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wfs::types::RawGeometry;
    use std::collections::VecDeque;
    use std::num::NonZeroU32;
    use std::sync::Mutex;

    fn feature(n: usize) -> RawFeature {
        let mut properties = serde_json::Map::new();
        properties.insert("n".to_string(), serde_json::json!(n));
        RawFeature {
            geometry: Some(RawGeometry {
                kind: Some("Point".to_string()),
                coordinates: serde_json::json!([n as f64, 51.5]),
            }),
            properties: Some(properties),
        }
    }

    fn page(start: usize, len: usize) -> RawPage {
        RawPage {
            features: (start..start + len).map(feature).collect(),
            number_matched: None,
            number_returned: Some(len as u64),
        }
    }

    fn query(page_size: u32) -> FeatureQuery {
        FeatureQuery::new(
            "key",
            "Zoomstack_RailwayStations",
            "<ogc:Filter/>",
            NonZeroU32::new(page_size).unwrap(),
        )
    }

    /// Serves scripted responses in order and records requested offsets.
    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<RawPage, WfsError>>>,
        offsets: Mutex<Vec<u64>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<RawPage, WfsError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                offsets: Mutex::new(Vec::new()),
            }
        }

        fn with_page_sizes(sizes: &[usize]) -> Self {
            let mut start = 0;
            let responses = sizes
                .iter()
                .map(|&len| {
                    let p = page(start, len);
                    start += len;
                    Ok(p)
                })
                .collect();
            Self::new(responses)
        }

        fn offsets(&self) -> Vec<u64> {
            self.offsets.lock().unwrap().clone()
        }
    }

    impl PageSource for ScriptedSource {
        async fn fetch_page(&self, query: &FeatureQuery) -> Result<RawPage, WfsError> {
            self.offsets.lock().unwrap().push(query.start_index());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected extra page request")
        }
    }

    /// Always answers with a full page.
    struct EndlessSource {
        requests: Mutex<u32>,
    }

    impl PageSource for EndlessSource {
        async fn fetch_page(&self, query: &FeatureQuery) -> Result<RawPage, WfsError> {
            *self.requests.lock().unwrap() += 1;
            Ok(page(
                query.start_index() as usize,
                query.page_size() as usize,
            ))
        }
    }

    #[tokio::test]
    async fn stops_on_short_page() {
        let source = ScriptedSource::with_page_sizes(&[100, 100, 37]);

        let outcome = fetch_all(&source, query(100), FetchLimits::default())
            .await
            .unwrap();

        assert_eq!(source.offsets(), vec![0, 100, 200]);
        assert_eq!(outcome.pages, 3);
        assert_eq!(outcome.features.len(), 237);
        assert_eq!(outcome.termination, Termination::Exhausted);
    }

    #[tokio::test]
    async fn features_keep_arrival_order() {
        let source = ScriptedSource::with_page_sizes(&[2, 2, 1]);

        let outcome = fetch_all(&source, query(2), FetchLimits::default())
            .await
            .unwrap();

        let ns: Vec<u64> = outcome
            .features
            .iter()
            .map(|f| f.properties.as_ref().unwrap()["n"].as_u64().unwrap())
            .collect();
        assert_eq!(ns, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn empty_first_page() {
        let source = ScriptedSource::with_page_sizes(&[0]);

        let outcome = fetch_all(&source, query(100), FetchLimits::default())
            .await
            .unwrap();

        assert_eq!(source.offsets(), vec![0]);
        assert!(outcome.features.is_empty());
        assert_eq!(outcome.termination, Termination::Exhausted);
    }

    #[tokio::test]
    async fn exact_multiple_needs_trailing_empty_page() {
        let source = ScriptedSource::with_page_sizes(&[100, 100, 0]);

        let outcome = fetch_all(&source, query(100), FetchLimits::default())
            .await
            .unwrap();

        assert_eq!(source.offsets(), vec![0, 100, 200]);
        assert_eq!(outcome.features.len(), 200);
    }

    #[tokio::test]
    async fn endless_full_pages_hit_page_limit() {
        let source = EndlessSource {
            requests: Mutex::new(0),
        };
        let limits = FetchLimits {
            max_pages: 5,
            max_features: u64::MAX,
        };

        let outcome = fetch_all(&source, query(10), limits).await.unwrap();

        assert_eq!(*source.requests.lock().unwrap(), 5);
        assert_eq!(outcome.pages, 5);
        assert_eq!(outcome.features.len(), 50);
        assert_eq!(outcome.termination, Termination::PageLimit);
        assert!(outcome.termination.is_limit());
    }

    #[tokio::test]
    async fn default_limits_bound_endless_source() {
        let source = EndlessSource {
            requests: Mutex::new(0),
        };

        let outcome = fetch_all(&source, query(100), FetchLimits::default())
            .await
            .unwrap();

        assert_eq!(outcome.pages, DEFAULT_MAX_PAGES);
        assert_eq!(outcome.termination, Termination::PageLimit);
    }

    #[tokio::test]
    async fn feature_limit() {
        let source = EndlessSource {
            requests: Mutex::new(0),
        };
        let limits = FetchLimits {
            max_pages: 1000,
            max_features: 25,
        };

        let outcome = fetch_all(&source, query(10), limits).await.unwrap();

        assert_eq!(outcome.pages, 3);
        assert_eq!(outcome.features.len(), 30);
        assert_eq!(outcome.termination, Termination::FeatureLimit);
    }

    #[tokio::test]
    async fn short_page_wins_over_limits() {
        let source = ScriptedSource::with_page_sizes(&[10, 3]);
        let limits = FetchLimits {
            max_pages: 2,
            max_features: 13,
        };

        let outcome = fetch_all(&source, query(10), limits).await.unwrap();
        assert_eq!(outcome.termination, Termination::Exhausted);
    }

    #[tokio::test]
    async fn mid_session_failure_discards_partial_result() {
        let source = ScriptedSource::new(vec![
            Ok(page(0, 100)),
            Err(WfsError::Api {
                status: 503,
                message: "Service Unavailable".to_string(),
            }),
            Ok(page(200, 37)),
        ]);

        let result = fetch_all(&source, query(100), FetchLimits::default()).await;

        assert!(matches!(result, Err(WfsError::Api { status: 503, .. })));
        assert_eq!(source.offsets(), vec![0, 100]);
    }

    #[tokio::test]
    async fn remembers_number_matched() {
        let mut first = page(0, 2);
        first.number_matched = Some(3);
        let source = ScriptedSource::new(vec![Ok(first), Ok(page(2, 1))]);

        let outcome = fetch_all(&source, query(2), FetchLimits::default())
            .await
            .unwrap();

        assert_eq!(outcome.number_matched, Some(3));
        assert_eq!(outcome.features.len(), 3);
    }

    #[tokio::test]
    async fn repeated_sessions_are_identical() {
        let first = ScriptedSource::with_page_sizes(&[100, 100, 37]);
        let second = ScriptedSource::with_page_sizes(&[100, 100, 37]);

        let a = fetch_all(&first, query(100), FetchLimits::default())
            .await
            .unwrap();
        let b = fetch_all(&second, query(100), FetchLimits::default())
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_vec(&a.features).unwrap(),
            serde_json::to_vec(&b.features).unwrap()
        );
    }

    #[test]
    fn termination_display() {
        assert_eq!(Termination::Exhausted.to_string(), "exhausted");
        assert_eq!(Termination::PageLimit.to_string(), "page limit reached");
        assert_eq!(
            serde_json::to_string(&Termination::FeatureLimit).unwrap(),
            "\"feature_limit\""
        );
    }
}
