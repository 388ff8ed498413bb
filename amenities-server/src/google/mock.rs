//! Mock Google client for development without API access.
//!
//! Loads canned nearby-search responses from JSON files and serves them as
//! if they were live, with a simple distance-based travel-time model.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{AmenityKind, Coordinates, PlaceSearch};
use crate::geo::{estimate_walking_minutes, format_minutes, haversine_km};
use crate::resolver::{PlacesProvider, ProviderError, RouteElement, TravelMode, TravelTimeProvider};

use super::convert::convert_places;
use super::error::GoogleError;
use super::types::PlacesResponse;

/// Average city driving speed used by the travel model (24 km/h).
const DRIVING_SPEED_KM_PER_MIN: f64 = 0.4;

/// Fixed parking and traffic-light allowance per drive.
const DRIVING_OVERHEAD_MINS: f64 = 2.0;

/// Mock client that serves places from JSON files.
///
/// Both travel modes are always answered; durations come from straight-line
/// distance.
#[derive(Debug, Clone, Default)]
pub struct MockPlacesClient {
    /// Pre-loaded nearby responses, keyed by category.
    responses: Arc<HashMap<AmenityKind, PlacesResponse>>,
}

impl MockPlacesClient {
    /// Create a mock client by loading JSON files from a directory.
    ///
    /// Expects files named after the category's place type
    /// (`hospital.json`, `train_station.json`, ...), each holding a nearby
    /// search response. Missing categories have no places.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, GoogleError> {
        let data_dir = data_dir.as_ref();
        let mut responses = HashMap::new();

        for kind in AmenityKind::ALL {
            let path = data_dir.join(format!("{}.json", kind.wire_name()));
            if !path.is_file() {
                continue;
            }

            let json = std::fs::read_to_string(&path).map_err(|e| {
                GoogleError::NotConfigured(format!("Failed to read {}: {e}", path.display()))
            })?;

            let response: PlacesResponse =
                serde_json::from_str(&json).map_err(|e| GoogleError::Json {
                    message: format!("Failed to parse {}: {e}", path.display()),
                    body: None,
                })?;

            responses.insert(kind, response);
        }

        if responses.is_empty() {
            return Err(GoogleError::NotConfigured(format!(
                "no mock place files in {}",
                data_dir.display()
            )));
        }

        tracing::info!(
            dir = %data_dir.display(),
            categories = responses.len(),
            "loaded mock places"
        );

        Ok(Self {
            responses: Arc::new(responses),
        })
    }

    /// Get list of categories with loaded data.
    pub fn available_categories(&self) -> Vec<AmenityKind> {
        let mut kinds: Vec<_> = self.responses.keys().copied().collect();
        kinds.sort();
        kinds
    }

    fn search(&self, at: Coordinates, kind: AmenityKind) -> Result<PlaceSearch, GoogleError> {
        match self.responses.get(&kind) {
            Some(response) => convert_places(response.clone(), &at),
            None => Ok(PlaceSearch::empty()),
        }
    }
}

/// Modelled travel time for a straight-line distance.
pub fn modelled_minutes(distance_km: f64, mode: TravelMode) -> u32 {
    match mode {
        TravelMode::Walking => estimate_walking_minutes(distance_km),
        TravelMode::Driving => {
            (distance_km / DRIVING_SPEED_KM_PER_MIN + DRIVING_OVERHEAD_MINS).round() as u32
        }
    }
}

impl PlacesProvider for MockPlacesClient {
    async fn search_nearby(
        &self,
        at: Coordinates,
        kind: AmenityKind,
    ) -> Result<PlaceSearch, ProviderError> {
        Ok(self.search(at, kind)?)
    }

    /// Text queries are answered from the category whose query matches.
    async fn search_by_text(
        &self,
        at: Coordinates,
        query: &str,
    ) -> Result<PlaceSearch, ProviderError> {
        let kind = AmenityKind::ALL
            .into_iter()
            .find(|k| k.text_query() == Some(query));

        match kind {
            Some(kind) => Ok(self.search(at, kind)?),
            None => Ok(PlaceSearch::empty()),
        }
    }
}

impl TravelTimeProvider for MockPlacesClient {
    async fn travel_times(
        &self,
        origin: Coordinates,
        destinations: &[Coordinates],
        mode: TravelMode,
    ) -> Result<Vec<RouteElement>, ProviderError> {
        Ok(destinations
            .iter()
            .map(|d| RouteElement::ok(format_minutes(modelled_minutes(haversine_km(&origin, d), mode))))
            .collect())
    }
}
