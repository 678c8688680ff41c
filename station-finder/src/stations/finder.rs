//! One station search session.

use std::num::NonZeroU32;

use geojson::FeatureCollection;
use tracing::{debug, info, warn};

use crate::boundary::AreaOfInterest;
use crate::wfs::{
    DEFAULT_PAGE_SIZE, DEFAULT_TYPE_NAMES, FeatureQuery, FetchLimits, PageSource, Termination,
    WfsError, WithinFilter, fetch_all, normalize_features,
};

/// Parameters of a station search, fixed for the life of a finder.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// Feature type to query.
    pub type_names: String,

    /// Features requested per page.
    pub page_size: NonZeroU32,

    /// Spatial filter shape and coordinate order.
    pub filter: WithinFilter,

    /// Safety bounds on pagination.
    pub limits: FetchLimits,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            type_names: DEFAULT_TYPE_NAMES.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            filter: WithinFilter::default(),
            limits: FetchLimits::default(),
        }
    }
}

/// Stations found by one session.
#[derive(Debug, Clone)]
pub struct StationReport {
    pub stations: FeatureCollection,
    pub pages: u32,
    pub termination: Termination,
}

/// Finds the stations inside an area of interest.
pub struct StationFinder<S> {
    source: S,
    api_key: String,
    settings: SearchSettings,
}

impl<S: PageSource + Sync> StationFinder<S> {
    pub fn new(source: S, api_key: impl Into<String>, settings: SearchSettings) -> Self {
        Self {
            source,
            api_key: api_key.into(),
            settings,
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Build the first-page query for `area`.
    pub fn query_for(&self, area: &AreaOfInterest) -> FeatureQuery {
        FeatureQuery::new(
            self.api_key.clone(),
            self.settings.type_names.clone(),
            self.settings.filter.build(area),
            self.settings.page_size,
        )
    }

    /// Run a search over the first of `boundaries`.
    ///
    /// Returns `Ok(None)` without touching the API when there is no
    /// boundary. Any page failure fails the whole session.
    pub async fn find(
        &self,
        boundaries: &[AreaOfInterest],
    ) -> Result<Option<StationReport>, WfsError> {
        let Some(area) = boundaries.first() else {
            warn!("no boundary available, skipping station search");
            return Ok(None);
        };

        if boundaries.len() > 1 {
            debug!(
                ignored = boundaries.len() - 1,
                "searching first boundary only"
            );
        }

        let query = self.query_for(area);
        let outcome = fetch_all(&self.source, query, self.settings.limits).await?;

        if outcome.termination.is_limit() {
            warn!(
                pages = outcome.pages,
                features = outcome.features.len(),
                termination = %outcome.termination,
                "station search stopped on safety limit"
            );
        }

        let stations = normalize_features(outcome.features);
        info!(
            stations = stations.features.len(),
            pages = outcome.pages,
            "station search complete"
        );

        Ok(Some(StationReport {
            stations,
            pages: outcome.pages,
            termination: outcome.termination,
        }))
    }
}
