//! Google Maps HTTP client.
//!
//! Provides async methods for the Places Nearby Search, Places Text Search
//! and Distance Matrix web services. Handles the API key, concurrency
//! limiting and conversion to domain types.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{AmenityKind, Coordinates, PlaceSearch};
use crate::resolver::{PlacesProvider, ProviderError, RouteElement, TravelMode, TravelTimeProvider};

use super::convert::{convert_matrix, convert_places};
use super::error::GoogleError;
use super::types::{DistanceMatrixResponse, PlacesResponse};

/// Default base URL for the Google Maps web services.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Default places search radius in metres.
const DEFAULT_RADIUS_M: u32 = 1000;

/// Configuration for the Google Maps client.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Places search radius in metres
    pub radius_m: u32,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GoogleConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            radius_m: DEFAULT_RADIUS_M,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the places search radius.
    pub fn with_radius(mut self, metres: u32) -> Self {
        self.radius_m = metres;
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Google Maps API client.
///
/// Uses a semaphore to limit concurrent requests; a single resolver run
/// issues up to nine calls at once.
#[derive(Debug, Clone)]
pub struct GoogleMapsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    radius_m: u32,
    semaphore: Arc<Semaphore>,
}

impl GoogleMapsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GoogleConfig) -> Result<Self, GoogleError> {
        if config.api_key.trim().is_empty() {
            return Err(GoogleError::NotConfigured("Google Maps API key is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            radius_m: config.radius_m,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Places of a given type near a point, nearest first.
    ///
    /// # Arguments
    ///
    /// * `at` - Search centre
    /// * `place_type` - Google place type, e.g. `hospital` or `train_station`
    pub async fn nearby_search(
        &self,
        at: Coordinates,
        place_type: &str,
    ) -> Result<PlaceSearch, GoogleError> {
        let response: PlacesResponse = self
            .get_json(
                "place/nearbysearch/json",
                &[
                    ("location", at.to_string()),
                    ("type", place_type.to_string()),
                    ("radius", self.radius_m.to_string()),
                ],
            )
            .await?;

        convert_places(response, &at)
    }

    /// Free-text place search biased towards a point, nearest first.
    pub async fn text_search(
        &self,
        at: Coordinates,
        query: &str,
    ) -> Result<PlaceSearch, GoogleError> {
        let response: PlacesResponse = self
            .get_json(
                "place/textsearch/json",
                &[
                    ("query", query.to_string()),
                    ("location", at.to_string()),
                    ("radius", self.radius_m.to_string()),
                ],
            )
            .await?;

        convert_places(response, &at)
    }

    /// Travel durations from one origin to many destinations.
    ///
    /// Returns one element per destination, in order.
    pub async fn distance_matrix(
        &self,
        origin: Coordinates,
        destinations: &[Coordinates],
        mode: TravelMode,
    ) -> Result<Vec<RouteElement>, GoogleError> {
        if destinations.is_empty() {
            return Ok(Vec::new());
        }

        let joined = destinations
            .iter()
            .map(Coordinates::to_string)
            .collect::<Vec<_>>()
            .join("|");

        let response: DistanceMatrixResponse = self
            .get_json(
                "distancematrix/json",
                &[
                    ("origins", origin.to_string()),
                    ("destinations", joined),
                    ("mode", mode.as_str().to_string()),
                    ("units", "metric".to_string()),
                ],
            )
            .await?;

        convert_matrix(response, destinations.len())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, GoogleError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| GoogleError::ApiError {
                status: "client".to_string(),
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "google maps request");

        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::FORBIDDEN || status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(GoogleError::RequestDenied(None));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GoogleError::OverQueryLimit);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GoogleError::ApiError {
                status: status.as_u16().to_string(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| GoogleError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl PlacesProvider for GoogleMapsClient {
    async fn search_nearby(
        &self,
        at: Coordinates,
        kind: AmenityKind,
    ) -> Result<PlaceSearch, ProviderError> {
        Ok(self.nearby_search(at, kind.wire_name()).await?)
    }

    async fn search_by_text(
        &self,
        at: Coordinates,
        query: &str,
    ) -> Result<PlaceSearch, ProviderError> {
        Ok(self.text_search(at, query).await?)
    }
}

impl TravelTimeProvider for GoogleMapsClient {
    async fn travel_times(
        &self,
        origin: Coordinates,
        destinations: &[Coordinates],
        mode: TravelMode,
    ) -> Result<Vec<RouteElement>, ProviderError> {
        Ok(self.distance_matrix(origin, destinations, mode).await?)
    }
}
