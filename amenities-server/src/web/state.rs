//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, CachedPlacesClient};
use crate::domain::{AmenityKind, Coordinates, PlaceSearch};
use crate::google::{GoogleMapsClient, MockPlacesClient};
use crate::resolver::{
    PlacesProvider, ProviderError, ResolverConfig, RouteElement, TravelMode, TravelTimeProvider,
};

/// Where places and travel times come from.
#[derive(Debug, Clone)]
pub enum MapsBackend {
    /// Live Google Maps web services
    Google(GoogleMapsClient),
    /// Fixture data with modelled travel times
    Mock(MockPlacesClient),
}

impl PlacesProvider for MapsBackend {
    async fn search_nearby(
        &self,
        at: Coordinates,
        kind: AmenityKind,
    ) -> Result<PlaceSearch, ProviderError> {
        match self {
            MapsBackend::Google(client) => client.search_nearby(at, kind).await,
            MapsBackend::Mock(client) => client.search_nearby(at, kind).await,
        }
    }

    async fn search_by_text(
        &self,
        at: Coordinates,
        query: &str,
    ) -> Result<PlaceSearch, ProviderError> {
        match self {
            MapsBackend::Google(client) => client.search_by_text(at, query).await,
            MapsBackend::Mock(client) => client.search_by_text(at, query).await,
        }
    }
}

impl TravelTimeProvider for MapsBackend {
    async fn travel_times(
        &self,
        origin: Coordinates,
        destinations: &[Coordinates],
        mode: TravelMode,
    ) -> Result<Vec<RouteElement>, ProviderError> {
        match self {
            MapsBackend::Google(client) => client.travel_times(origin, destinations, mode).await,
            MapsBackend::Mock(client) => client.travel_times(origin, destinations, mode).await,
        }
    }
}

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached places provider
    pub places: Arc<CachedPlacesClient<MapsBackend>>,

    /// Travel-time provider (uncached)
    pub travel: Arc<MapsBackend>,

    /// Resolver configuration
    pub config: Arc<ResolverConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(backend: MapsBackend, cache_config: &CacheConfig, config: ResolverConfig) -> Self {
        Self {
            places: Arc::new(CachedPlacesClient::new(backend.clone(), cache_config)),
            travel: Arc::new(backend),
            config: Arc::new(config),
        }
    }
}
