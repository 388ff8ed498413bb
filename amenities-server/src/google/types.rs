//! Google Maps web service response types.
//!
//! These mirror the JSON shapes of the Places (nearby and text search) and
//! Distance Matrix endpoints. Only the fields the resolver reads are kept;
//! everything else is ignored on deserialization.

use serde::{Deserialize, Serialize};

/// Response from Places Nearby Search or Text Search.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlacesResponse {
    /// `OK`, `ZERO_RESULTS`, `REQUEST_DENIED`, `OVER_QUERY_LIMIT`, ...
    pub status: String,

    #[serde(default)]
    pub results: Vec<PlaceResult>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// A single place in a search response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaceResult {
    pub name: String,

    pub geometry: Geometry,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,

    /// Short address (nearby search).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vicinity: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Response from the Distance Matrix endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DistanceMatrixResponse {
    pub status: String,

    #[serde(default)]
    pub rows: Vec<MatrixRow>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// One origin's row. Elements are in destination order.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatrixRow {
    #[serde(default)]
    pub elements: Vec<MatrixElement>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatrixElement {
    /// `OK`, `NOT_FOUND` or `ZERO_RESULTS`.
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<TextValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<TextValue>,
}

/// A display text with its numeric value (seconds or metres).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TextValue {
    pub text: String,
    pub value: u64,
}
