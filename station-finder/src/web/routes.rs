//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use geojson::{Feature, FeatureCollection};
use tracing::{error, warn};

use crate::stations::RefreshSummary;
use crate::wfs::PageSource;

use super::dto::ErrorResponse;
use super::state::AppState;

/// Create the application router.
pub fn create_router<S>(state: AppState<S>) -> Router
where
    S: PageSource + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/boundary", get(boundary::<S>))
        .route("/api/stations", get(stations::<S>))
        .route("/api/stations/refresh", post(refresh_stations::<S>))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The search boundary as a Polygon feature with its bbox.
async fn boundary<S>(State(state): State<AppState<S>>) -> Result<Json<Feature>, AppError>
where
    S: PageSource + Send + Sync + 'static,
{
    let area = state.layer.boundary().ok_or_else(|| AppError::NotFound {
        message: "no boundary loaded".to_string(),
    })?;

    Ok(Json(area.to_feature()))
}

/// Latest station collection. Empty until a search succeeds.
async fn stations<S>(State(state): State<AppState<S>>) -> Json<FeatureCollection>
where
    S: PageSource + Send + Sync + 'static,
{
    Json(state.layer.snapshot().await)
}

/// Re-run the station search. On failure the previous collection is kept.
async fn refresh_stations<S>(
    State(state): State<AppState<S>>,
) -> Result<Json<RefreshSummary>, AppError>
where
    S: PageSource + Send + Sync + 'static,
{
    match state.layer.refresh().await {
        Ok(Some(summary)) => Ok(Json(summary)),
        Ok(None) => Err(AppError::Conflict {
            message: "no boundary to search".to_string(),
        }),
        Err(e) => Err(AppError::Upstream {
            message: e.to_string(),
        }),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    NotFound { message: String },
    Conflict { message: String },
    Upstream { message: String },
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match self {
            AppError::NotFound { message }
            | AppError::Conflict { message }
            | AppError::Upstream { message } => message,
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
