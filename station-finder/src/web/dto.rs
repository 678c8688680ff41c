//! Response bodies that are not GeoJSON.

use serde::Serialize;

/// Error body returned by failing endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
