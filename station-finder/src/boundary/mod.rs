//! Area of interest loading.
//!
//! Boundaries come from a static JSON document read once at startup. Only
//! the outer ring of each polygon is kept; it scopes the station search.

mod area;
mod error;
mod loader;

pub use area::{AreaOfInterest, Bounds, LonLat};
pub use error::BoundaryError;
pub use loader::{load_boundaries, parse_boundaries};
