//! Data transfer objects for web requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Amenity, DurationSource, PlaceCandidate, PlaceSearch, SearchStatus, TravelTime};
use crate::resolver::{AmenityReporter, CategoryResults, FinalizeTrigger, Resolution, RouteElement, TravelTimeMatrix};

/// Query for endpoints taking a single point.
///
/// Values are kept as strings so malformed input yields a JSON error
/// rather than a plain-text rejection.
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

/// Query for the batch travel-time endpoint.
#[derive(Debug, Deserialize)]
pub struct BatchDistanceQuery {
    pub origin_lat: Option<String>,
    pub origin_lng: Option<String>,

    /// Pipe-separated `lat,lng` pairs
    pub destinations: Option<String>,

    /// `walking` (default) or `driving`; ignored by the two-mode endpoint
    pub mode: Option<String>,
}

/// One leg of an amenity's travel times.
#[derive(Debug, Clone, Serialize)]
pub struct TravelTimeDto {
    /// Display text: a duration, `"N/A"` or `"Calculating..."`
    pub text: String,

    /// Whole minutes, when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,

    /// Whether the duration was estimated from distance
    pub estimated: bool,
}

impl TravelTimeDto {
    pub fn from_travel_time(time: &TravelTime) -> Self {
        Self {
            text: time.to_string(),
            minutes: time.minutes(),
            estimated: matches!(
                time,
                TravelTime::Available(d) if d.source == DurationSource::Estimated
            ),
        }
    }
}

/// An amenity in the response.
#[derive(Debug, Clone, Serialize)]
pub struct AmenityDto {
    pub name: String,

    /// Category place type, e.g. `"hospital"`
    pub category: &'static str,

    /// Category display name, e.g. `"Hospital"`
    pub category_name: &'static str,

    pub icon: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub walking: TravelTimeDto,
    pub driving: TravelTimeDto,
}

impl AmenityDto {
    pub fn from_amenity(amenity: &Amenity) -> Self {
        Self {
            name: amenity.name.clone(),
            category: amenity.kind.wire_name(),
            category_name: amenity.category_name,
            icon: amenity.icon,
            lat: amenity.location.lat,
            lng: amenity.location.lng,
            walking: TravelTimeDto::from_travel_time(amenity.walking()),
            driving: TravelTimeDto::from_travel_time(amenity.driving()),
        }
    }
}

/// Response for the amenities endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AmenitiesResponse {
    /// `"OK"` or `"ERROR"`
    pub status: &'static str,

    pub amenities: Vec<AmenityDto>,

    /// User-facing message when no amenities could be shown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Categories that answered before the search finalized
    pub categories_completed: usize,

    /// Whether the search hit its time ceiling
    pub timed_out: bool,

    /// RFC 3339 timestamp
    pub generated_at: String,
}

/// Reporter that builds the JSON response body.
#[derive(Debug, Default)]
pub struct JsonReport {
    amenities: Vec<AmenityDto>,
    error: Option<String>,
}

impl JsonReport {
    /// Build the response, filling in run metadata from `resolution`.
    pub fn into_response(self, resolution: &Resolution) -> AmenitiesResponse {
        AmenitiesResponse {
            status: if self.error.is_some() { "ERROR" } else { "OK" },
            amenities: self.amenities,
            error: self.error,
            categories_completed: resolution.categories_completed,
            timed_out: resolution.trigger == FinalizeTrigger::Timeout,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl AmenityReporter for JsonReport {
    fn render_amenities(&mut self, amenities: &[Amenity]) {
        self.amenities = amenities.iter().map(AmenityDto::from_amenity).collect();
        self.error = None;
    }

    fn render_error(&mut self, message: &str) {
        self.amenities.clear();
        self.error = Some(message.to_string());
    }
}

/// Location of a place, shaped like a places search result.
#[derive(Debug, Clone, Serialize)]
pub struct LatLngDto {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeometryDto {
    pub location: LatLngDto,
}

/// A place in the places search result shape.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceDto {
    pub name: String,
    pub geometry: GeometryDto,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u32>,
}

impl PlaceDto {
    pub fn from_candidate(place: PlaceCandidate) -> Self {
        Self {
            name: place.name,
            geometry: GeometryDto {
                location: LatLngDto {
                    lat: place.location.lat,
                    lng: place.location.lng,
                },
            },
            rating: place.rating,
            user_ratings_total: place.review_count,
        }
    }
}

/// One category's search outcome.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceSearchDto {
    pub status: SearchStatus,
    pub results: Vec<PlaceDto>,
}

impl PlaceSearchDto {
    pub fn from_search(search: PlaceSearch) -> Self {
        Self {
            status: search.status,
            results: search.results.into_iter().map(PlaceDto::from_candidate).collect(),
        }
    }
}

/// Response for the raw multi-category search endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AllAmenitiesResponse {
    pub status: &'static str,

    /// Search results keyed by category place type
    pub results: BTreeMap<&'static str, PlaceSearchDto>,
}

impl AllAmenitiesResponse {
    pub fn from_results(results: CategoryResults) -> Self {
        Self {
            status: "OK",
            results: results
                .into_iter()
                .map(|(kind, search)| (kind.wire_name(), PlaceSearchDto::from_search(search)))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DurationDto {
    pub text: String,
}

/// A single travel-time element.
#[derive(Debug, Clone, Serialize)]
pub struct MatrixElementDto {
    /// `"OK"` or `"ZERO_RESULTS"`
    pub status: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<DurationDto>,
}

impl MatrixElementDto {
    pub fn from_element(element: &RouteElement) -> Self {
        match element.duration_text() {
            Some(text) => Self {
                status: "OK",
                duration: Some(DurationDto {
                    text: text.to_string(),
                }),
            },
            None => Self {
                status: "ZERO_RESULTS",
                duration: None,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatrixRowDto {
    pub elements: Vec<MatrixElementDto>,
}

/// Travel times from one origin, in the distance matrix shape: a single
/// row whose elements follow the destination order.
#[derive(Debug, Clone, Serialize)]
pub struct DistanceMatrixDto {
    pub status: &'static str,
    pub rows: Vec<MatrixRowDto>,
}

impl DistanceMatrixDto {
    pub fn from_elements(elements: &[RouteElement]) -> Self {
        Self {
            status: "OK",
            rows: vec![MatrixRowDto {
                elements: elements.iter().map(MatrixElementDto::from_element).collect(),
            }],
        }
    }
}

/// Response for the two-mode batch travel-time endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct BatchDistanceResponse {
    pub status: &'static str,
    pub walking: DistanceMatrixDto,
    pub driving: DistanceMatrixDto,
}

impl BatchDistanceResponse {
    pub fn from_matrix(matrix: &TravelTimeMatrix) -> Self {
        Self {
            status: "OK",
            walking: DistanceMatrixDto::from_elements(&matrix.walking),
            driving: DistanceMatrixDto::from_elements(&matrix.driving),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
