//! Application state for the web layer.

use crate::stations::StationLayer;

/// Shared application state.
pub struct AppState<S> {
    /// Boundary and latest station collection
    pub layer: StationLayer<S>,
}

impl<S> AppState<S> {
    pub fn new(layer: StationLayer<S>) -> Self {
        Self { layer }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            layer: self.layer.clone(),
        }
    }
}
