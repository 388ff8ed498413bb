//! Conversion from Google response types to domain types.

use tracing::debug;

use crate::domain::{Coordinates, PlaceCandidate, PlaceSearch};
use crate::resolver::RouteElement;

use super::error::GoogleError;
use super::types::{DistanceMatrixResponse, PlaceResult, PlacesResponse};

/// Convert a places response into a search result ordered nearest-first
/// from `origin`.
///
/// `REQUEST_DENIED`, `OVER_QUERY_LIMIT` and any other non-success status
/// become errors; `ZERO_RESULTS` is an empty search.
pub fn convert_places(
    response: PlacesResponse,
    origin: &Coordinates,
) -> Result<PlaceSearch, GoogleError> {
    check_status(&response.status, response.error_message)?;
    if response.status == "ZERO_RESULTS" {
        return Ok(PlaceSearch::empty());
    }

    let mut search = PlaceSearch::found(response.results.into_iter().map(convert_place).collect());
    search.sort_nearest_to(origin);

    Ok(search)
}

fn convert_place(result: PlaceResult) -> PlaceCandidate {
    PlaceCandidate {
        name: result.name,
        rating: result.rating,
        review_count: result.user_ratings_total,
        location: Coordinates {
            lat: result.geometry.location.lat,
            lng: result.geometry.location.lng,
        },
    }
}

/// Convert a distance matrix response for a single origin into elements
/// index-aligned with the requested destinations.
pub fn convert_matrix(
    response: DistanceMatrixResponse,
    destinations: usize,
) -> Result<Vec<RouteElement>, GoogleError> {
    check_status(&response.status, response.error_message)?;

    let row = response
        .rows
        .into_iter()
        .next()
        .ok_or_else(|| GoogleError::Json {
            message: "distance matrix response has no rows".to_string(),
            body: None,
        })?;

    if row.elements.len() != destinations {
        debug!(
            expected = destinations,
            received = row.elements.len(),
            "distance matrix row length mismatch"
        );
    }

    Ok(row
        .elements
        .into_iter()
        .map(|element| match (element.status.as_str(), element.duration) {
            ("OK", Some(duration)) => RouteElement::ok(duration.text),
            _ => RouteElement::Unavailable,
        })
        .collect())
}

fn check_status(status: &str, error_message: Option<String>) -> Result<(), GoogleError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        "REQUEST_DENIED" => Err(GoogleError::RequestDenied(error_message)),
        "OVER_QUERY_LIMIT" => Err(GoogleError::OverQueryLimit),
        other => Err(GoogleError::ApiError {
            status: other.to_string(),
            message: error_message.unwrap_or_default(),
        }),
    }
}
