use std::net::SocketAddr;

use amenities_server::cache::CacheConfig;
use amenities_server::google::{GoogleConfig, GoogleMapsClient, MockPlacesClient};
use amenities_server::resolver::ResolverConfig;
use amenities_server::web::{AppState, MapsBackend, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Bind address when `AMENITIES_ADDR` is not set.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Log filter when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "info,amenities_server=debug";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    // Fixture data takes precedence so development never needs a key
    let backend = match std::env::var("AMENITIES_MOCK_DATA") {
        Ok(dir) => {
            info!(%dir, "using mock places data");
            MapsBackend::Mock(MockPlacesClient::new(&dir)?)
        }
        Err(_) => {
            let api_key = std::env::var("GOOGLE_MAPS_API_KEY").map_err(|_| {
                "GOOGLE_MAPS_API_KEY is not set (set AMENITIES_MOCK_DATA for offline mode)"
            })?;
            MapsBackend::Google(GoogleMapsClient::new(GoogleConfig::new(api_key))?)
        }
    };

    let state = AppState::new(backend, &CacheConfig::default(), ResolverConfig::default());
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("AMENITIES_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;

    info!(%addr, "nearby amenities server listening");
    info!("  GET /health                   - Health check");
    info!("  GET /api/amenities            - Resolve nearby amenities (lat, lng)");
    info!("  GET /api/all-amenities        - Raw search of every category (lat, lng)");
    info!("  GET /api/batch-distance-both  - Walking and driving times");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
