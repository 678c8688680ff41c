//! Shared station snapshot for the map.

use std::sync::Arc;

use geojson::FeatureCollection;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::boundary::AreaOfInterest;
use crate::wfs::{PageSource, Termination, WfsError};

use super::finder::StationFinder;

/// Summary of a successful refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RefreshSummary {
    pub stations: usize,
    pub pages: u32,
    pub termination: Termination,
}

/// Thread-safe holder of the latest station collection.
///
/// Starts empty. A refresh that fails or is skipped leaves the current
/// collection in place, so consumers keep seeing stale data.
pub struct StationLayer<S> {
    inner: Arc<RwLock<FeatureCollection>>,
    boundaries: Arc<[AreaOfInterest]>,
    finder: Arc<StationFinder<S>>,
}

impl<S> Clone for StationLayer<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            boundaries: Arc::clone(&self.boundaries),
            finder: Arc::clone(&self.finder),
        }
    }
}

impl<S: PageSource + Sync> StationLayer<S> {
    pub fn new(finder: StationFinder<S>, boundaries: Vec<AreaOfInterest>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(empty_collection())),
            boundaries: boundaries.into(),
            finder: Arc::new(finder),
        }
    }

    /// The area stations are searched in, if one was loaded.
    pub fn boundary(&self) -> Option<&AreaOfInterest> {
        self.boundaries.first()
    }

    /// Copy of the current collection.
    pub async fn snapshot(&self) -> FeatureCollection {
        self.inner.read().await.clone()
    }

    /// Number of stations in the current collection.
    pub async fn len(&self) -> usize {
        self.inner.read().await.features.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.features.is_empty()
    }

    /// Run a new search and replace the collection on success.
    ///
    /// Returns `Ok(None)` when the search was skipped for lack of a
    /// boundary. On error the existing collection is preserved.
    pub async fn refresh(&self) -> Result<Option<RefreshSummary>, WfsError> {
        let Some(report) = self.finder.find(&self.boundaries).await? else {
            return Ok(None);
        };

        let summary = RefreshSummary {
            stations: report.stations.features.len(),
            pages: report.pages,
            termination: report.termination,
        };

        let mut guard = self.inner.write().await;
        *guard = report.stations;

        Ok(Some(summary))
    }
}

fn empty_collection() -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: Vec::new(),
        foreign_members: None,
    }
}
