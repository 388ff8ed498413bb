//! Google Maps web service client.
//!
//! Three endpoints are used:
//! - Places Nearby Search: places of one type within a radius
//! - Places Text Search: free-text search biased to a location, used where
//!   the place type alone is too noisy (stations, hospitals)
//! - Distance Matrix: walking and driving durations from one origin
//!
//! Durations are kept as the display text the service returns
//! (`"1 hour 5 mins"`); the resolver parses them.

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{GoogleConfig, GoogleMapsClient};
pub use convert::{convert_matrix, convert_places};
pub use error::GoogleError;
pub use mock::{MockPlacesClient, modelled_minutes};
pub use types::{
    DistanceMatrixResponse, Geometry, LatLng, MatrixElement, MatrixRow, PlaceResult,
    PlacesResponse, TextValue,
};
