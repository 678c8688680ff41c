//! Station search over an area of interest.
//!
//! A search builds a spatial filter from the boundary, pages through the
//! feature API and normalizes the results. The layer keeps the latest
//! successful result for the map.

mod finder;
mod layer;

pub use finder::{SearchSettings, StationFinder, StationReport};
pub use layer::{RefreshSummary, StationLayer};
