//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{AmenityKind, Coordinates, InvalidCoordinates};
use crate::resolver::{PlacesProvider, ProviderError, Resolver, TravelMode, TravelTimeProvider};

use super::dto::*;
use super::state::AppState;
use super::templates::HtmlReport;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/amenities", get(amenities))
        .route("/api/all-amenities", get(all_amenities))
        .route("/api/batch-distance", get(batch_distance))
        .route("/api/batch-distance-both", get(batch_distance_both))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Parse a required coordinate pair from query values.
fn parse_location(lat: Option<&str>, lng: Option<&str>) -> Result<Coordinates, AppError> {
    let (Some(lat), Some(lng)) = (lat, lng) else {
        return Err(AppError::BadRequest {
            message: "lat and lng are required".to_string(),
        });
    };

    Ok(Coordinates::parse_pair(&format!("{lat},{lng}"))?)
}

/// Resolve the nearby amenities of a property.
async fn amenities(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<LocationQuery>,
) -> Result<Response, AppError> {
    let at = parse_location(req.lat.as_deref(), req.lng.as_deref())?;

    let resolver = Resolver::new(state.places.as_ref(), state.travel.as_ref(), state.config.as_ref());

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let mut report = HtmlReport::default();
        resolver.run(at, &mut report).await;

        let html = report.finish().map_err(|e| AppError::Internal {
            message: format!("Template error: {e}"),
        })?;

        Ok(Html(html).into_response())
    } else {
        let mut report = JsonReport::default();
        let resolution = resolver.run(at, &mut report).await;

        Ok(Json(report.into_response(&resolution)).into_response())
    }
}

/// Raw search of every category around a point.
async fn all_amenities(
    State(state): State<AppState>,
    Query(req): Query<LocationQuery>,
) -> Result<Json<AllAmenitiesResponse>, AppError> {
    let at = parse_location(req.lat.as_deref(), req.lng.as_deref())?;

    let results = state.places.search_all(at, &AmenityKind::ALL).await?;

    Ok(Json(AllAmenitiesResponse::from_results(results)))
}

/// Parse the pipe-separated destination list.
fn parse_destinations(destinations: Option<&str>) -> Result<Vec<Coordinates>, AppError> {
    let destinations = destinations
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest {
            message: "destinations are required".to_string(),
        })?;

    Ok(destinations
        .split('|')
        .map(Coordinates::parse_pair)
        .collect::<Result<Vec<_>, _>>()?)
}

/// Travel times for one mode from one origin to many destinations.
async fn batch_distance(
    State(state): State<AppState>,
    Query(req): Query<BatchDistanceQuery>,
) -> Result<Json<DistanceMatrixDto>, AppError> {
    let origin = parse_location(req.origin_lat.as_deref(), req.origin_lng.as_deref())?;
    let destinations = parse_destinations(req.destinations.as_deref())?;

    let mode = match req.mode.as_deref() {
        None => TravelMode::Walking,
        Some(name) => TravelMode::from_name(name).ok_or_else(|| AppError::BadRequest {
            message: format!("unknown travel mode: {name}"),
        })?,
    };

    let elements = state.travel.travel_times(origin, &destinations, mode).await?;

    Ok(Json(DistanceMatrixDto::from_elements(&elements)))
}

/// Walking and driving times from one origin to many destinations.
async fn batch_distance_both(
    State(state): State<AppState>,
    Query(req): Query<BatchDistanceQuery>,
) -> Result<Json<BatchDistanceResponse>, AppError> {
    let origin = parse_location(req.origin_lat.as_deref(), req.origin_lng.as_deref())?;
    let destinations = parse_destinations(req.destinations.as_deref())?;

    let matrix = state.travel.batch_travel_times(origin, &destinations).await?;

    Ok(Json(BatchDistanceResponse::from_matrix(&matrix)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl From<InvalidCoordinates> for AppError {
    fn from(e: InvalidCoordinates) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "bad request");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
