//! Boundary loading error types.

use std::path::PathBuf;

/// Errors that can occur when loading boundary polygons.
#[derive(Debug, thiserror::Error)]
pub enum BoundaryError {
    /// The boundary file could not be read
    #[error("failed to read boundary file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is neither GeoJSON nor the simplified boundary shape
    #[error("boundary JSON parse error: {message}")]
    Json { message: String },
}
