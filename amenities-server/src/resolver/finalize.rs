//! Turning the accepted amenity set into the final result list.
//!
//! Runs once per search, after the category phase has ended: distant
//! amenities are dropped, travel times are applied (or estimated when the
//! routing service is unavailable), implausible entries are removed and
//! the rest are ordered by walking then driving time.

use tracing::debug;

use crate::domain::{Amenity, Coordinates, TravelTime};
use crate::geo::{estimate_walking_time, haversine_km, parse_duration_minutes};

use super::config::ResolverConfig;
use super::provider::TravelTimeMatrix;

/// Drop amenities farther than `max_km` from `origin` in straight-line
/// distance.
pub fn drop_distant(amenities: Vec<Amenity>, origin: &Coordinates, max_km: f64) -> Vec<Amenity> {
    amenities
        .into_iter()
        .filter(|a| {
            let km = haversine_km(origin, &a.location);
            let keep = km <= max_km;
            if !keep {
                debug!(name = %a.name, distance_km = km, "dropping distant amenity");
            }
            keep
        })
        .collect()
}

/// Resolve both travel legs of every amenity.
///
/// `matrix` is index-aligned with `amenities`. `None` means the lookup
/// failed: walking is estimated from distance and driving is unavailable.
pub fn apply_travel_times(
    amenities: &mut [Amenity],
    origin: &Coordinates,
    matrix: Option<&TravelTimeMatrix>,
    config: &ResolverConfig,
) {
    for (index, amenity) in amenities.iter_mut().enumerate() {
        let walking = match matrix.and_then(|m| m.walking_at(index)) {
            Some(text) => routed_within(text, config.max_walk_mins),
            None => estimated_walk(origin, &amenity.location, config.max_estimated_walk_mins),
        };
        let driving = match matrix.and_then(|m| m.driving_at(index)) {
            Some(text) => routed_within(text, config.max_drive_mins),
            None => TravelTime::NotAvailable,
        };

        amenity.resolve_walking(walking);
        amenity.resolve_driving(driving);
    }
}

fn routed_within(text: &str, ceiling: u32) -> TravelTime {
    let minutes = parse_duration_minutes(text);
    if minutes <= ceiling {
        TravelTime::routed(minutes, text)
    } else {
        TravelTime::NotAvailable
    }
}

fn estimated_walk(origin: &Coordinates, to: &Coordinates, ceiling: u32) -> TravelTime {
    let text = estimate_walking_time(haversine_km(origin, to));
    let minutes = parse_duration_minutes(&text);
    if minutes <= ceiling {
        TravelTime::estimated(minutes, text)
    } else {
        TravelTime::NotAvailable
    }
}

/// Whether an amenity is worth showing: a resolved walk within the walking
/// limit or a resolved drive within the driving limit.
pub fn is_plausible(amenity: &Amenity, config: &ResolverConfig) -> bool {
    !amenity.is_pending()
        && (amenity.walking().within(config.max_walk_mins)
            || amenity.driving().within(config.max_drive_mins))
}

/// Order by walking time, then driving time. Unavailable legs sort last and
/// the sort is stable, so equal entries keep arrival order.
pub fn sort_by_travel_time(amenities: &mut [Amenity]) {
    amenities.sort_by_key(|a| (a.walking().sort_minutes(), a.driving().sort_minutes()));
}

/// Apply travel times, filter, sort and truncate.
pub fn finalize_amenities(
    mut amenities: Vec<Amenity>,
    origin: &Coordinates,
    matrix: Option<&TravelTimeMatrix>,
    config: &ResolverConfig,
) -> Vec<Amenity> {
    apply_travel_times(&mut amenities, origin, matrix, config);

    let before = amenities.len();
    amenities.retain(|a| is_plausible(a, config));
    if amenities.len() < before {
        debug!(dropped = before - amenities.len(), "dropped amenities with no usable travel time");
    }

    sort_by_travel_time(&mut amenities);
    amenities.truncate(config.max_results);
    amenities
}
