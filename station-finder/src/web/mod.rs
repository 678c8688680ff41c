//! Web layer for the station map.
//!
//! Serves the boundary and the latest station collection as GeoJSON for a
//! map frontend, plus an endpoint to re-run the station search.

mod dto;
mod routes;
mod state;

pub use dto::ErrorResponse;
pub use routes::{AppError, create_router};
pub use state::AppState;
