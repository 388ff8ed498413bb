//! Geospatial helpers: great-circle distance and travel-time text.

mod distance;
mod duration;

pub use distance::{EARTH_RADIUS_KM, haversine_km};
pub use duration::{
    UNREACHABLE_MINUTES, WALKING_OVERHEAD, WALKING_SPEED_KM_PER_MIN, estimate_walking_minutes,
    estimate_walking_time, format_minutes, parse_duration_minutes,
};
