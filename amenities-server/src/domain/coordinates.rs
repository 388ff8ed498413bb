//! Geographic coordinate type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when constructing out-of-range coordinates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinates: {reason}")]
pub struct InvalidCoordinates {
    reason: &'static str,
}

/// A WGS84 latitude/longitude pair in decimal degrees.
///
/// `Coordinates::new` guarantees both components are finite and in range.
/// The fields stay public so provider responses can be carried through
/// unchanged; only property locations supplied by callers go through
/// validation.
///
/// # Examples
///
/// ```
/// use amenities_server::domain::Coordinates;
///
/// let kolkata = Coordinates::new(22.57, 88.36).unwrap();
/// assert_eq!(kolkata.to_string(), "22.57,88.36");
///
/// assert!(Coordinates::new(91.0, 0.0).is_err());
/// assert!(Coordinates::new(0.0, -180.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create validated coordinates.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinates> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidCoordinates {
                reason: "latitude and longitude must be finite numbers",
            });
        }

        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinates {
                reason: "latitude must be between -90 and 90",
            });
        }

        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidCoordinates {
                reason: "longitude must be between -180 and 180",
            });
        }

        Ok(Self { lat, lng })
    }

    /// Parse a `"lat,lng"` pair, as used in Distance Matrix destination lists.
    pub fn parse_pair(s: &str) -> Result<Self, InvalidCoordinates> {
        let (lat, lng) = s.split_once(',').ok_or(InvalidCoordinates {
            reason: "expected \"lat,lng\"",
        })?;

        let lat = lat.trim().parse::<f64>().map_err(|_| InvalidCoordinates {
            reason: "latitude is not a number",
        })?;
        let lng = lng.trim().parse::<f64>().map_err(|_| InvalidCoordinates {
            reason: "longitude is not a number",
        })?;

        Self::new(lat, lng)
    }

    /// Whether both components are within `tolerance` degrees of `other`.
    pub fn within_degrees(&self, other: &Coordinates, tolerance: f64) -> bool {
        (self.lat - other.lat).abs() < tolerance && (self.lng - other.lng).abs() < tolerance
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}
