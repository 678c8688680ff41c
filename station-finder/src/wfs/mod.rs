//! OGC WFS feature API client.
//!
//! This module fetches features from a paged `GetFeature` endpoint such as
//! the Ordnance Survey Features API.
//!
//! Key characteristics of the API:
//! - Results are paged with `count` and `startIndex`; the total is not
//!   known up front, so a page shorter than `count` marks the end
//! - The spatial constraint is an XML filter in a query parameter, with
//!   EPSG:4326 coordinates in latitude-first order
//! - Output is GeoJSON with a `features` array

mod client;
mod error;
mod filter;
mod mock;
mod normalize;
mod pager;
mod query;
mod types;

pub use client::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, DEFAULT_TYPE_NAMES, WfsClient, WfsConfig};
pub use error::WfsError;
pub use filter::{CoordinateOrder, WithinFilter, serialize_ring};
pub use mock::MockWfsClient;
pub use normalize::{NormalizeError, normalize_feature, normalize_features};
pub use pager::{FetchLimits, FetchOutcome, PageSource, Termination, fetch_all};
pub use query::FeatureQuery;
pub use types::{RawFeature, RawGeometry, RawPage};
