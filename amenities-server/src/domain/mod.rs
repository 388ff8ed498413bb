//! Domain types for the amenities resolver.
//!
//! These types carry validated data between the providers, the resolver
//! and the web layer. Coordinates are range-checked at construction and
//! travel times can only move forward from `Pending`.

mod amenity;
mod category;
mod coordinates;
mod place;

pub use amenity::{Amenity, DurationSource, TravelDuration, TravelTime};
pub use category::{AmenityCategory, AmenityKind, CATEGORIES};
pub use coordinates::{Coordinates, InvalidCoordinates};
pub use place::{PlaceCandidate, PlaceSearch, SearchStatus, normalize_name};
