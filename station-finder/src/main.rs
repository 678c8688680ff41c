use std::error::Error;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use station_finder::boundary::{AreaOfInterest, load_boundaries};
use station_finder::config::{AppConfig, FeatureSource};
use station_finder::stations::{StationFinder, StationLayer};
use station_finder::wfs::{MockWfsClient, PageSource, WfsClient};
use station_finder::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("station_finder=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    info!(?config, "starting station finder");

    // A missing boundary is not fatal: searches are skipped and the map
    // shows an empty station layer.
    let boundaries = match load_boundaries(&config.boundary_path) {
        Ok(areas) => areas,
        Err(e) => {
            error!(error = %e, "failed to load boundary");
            Vec::new()
        }
    };

    match config.source.clone() {
        FeatureSource::Live { api_key } => {
            let client = WfsClient::new(config.wfs.clone())?;
            serve(client, api_key, boundaries, &config).await
        }
        FeatureSource::Mock { features } => {
            let client = MockWfsClient::from_file(&features)?;
            info!(?features, count = client.len(), "using mock feature source");
            serve(client, String::new(), boundaries, &config).await
        }
    }
}

async fn serve<S>(
    source: S,
    api_key: String,
    boundaries: Vec<AreaOfInterest>,
    config: &AppConfig,
) -> Result<(), Box<dyn Error>>
where
    S: PageSource + Send + Sync + 'static,
{
    let finder = StationFinder::new(source, api_key, config.search.clone());
    let layer = StationLayer::new(finder, boundaries);

    match layer.refresh().await {
        Ok(Some(summary)) => info!(
            stations = summary.stations,
            pages = summary.pages,
            termination = %summary.termination,
            "loaded stations"
        ),
        Ok(None) => {}
        Err(e) => error!(error = %e, "initial station search failed"),
    }

    let app = create_router(AppState::new(layer));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "station finder listening");
    info!("  GET  /health                - Health check");
    info!("  GET  /api/boundary          - Search boundary (GeoJSON)");
    info!("  GET  /api/stations          - Stations in the boundary (GeoJSON)");
    info!("  POST /api/stations/refresh  - Re-run the station search");

    axum::serve(listener, app).await?;
    Ok(())
}
