//! Nearby-amenity resolution.
//!
//! Given a point, the resolver searches every amenity category
//! concurrently, filters and ranks the candidates of each category, keeps
//! at most one amenity per category, attaches walking and driving times
//! and returns the few amenities that are genuinely close.
//!
//! The category phase ends when every category has answered and no result
//! has arrived for a short settle period, or when a hard ceiling fires.

mod config;
mod dedup;
mod finalize;
mod provider;
mod rank;
mod report;
mod search;

#[cfg(test)]
mod search_tests;

pub use config::{DispatchMode, ResolverConfig};
pub use dedup::{AmenitySet, LOCATION_TOLERANCE_DEG, is_duplicate};
pub use finalize::{
    apply_travel_times, drop_distant, finalize_amenities, is_plausible, sort_by_travel_time,
};
pub use provider::{
    CategoryResults, PlacesProvider, ProviderError, RouteElement, TravelMode, TravelTimeMatrix,
    TravelTimeProvider,
};
pub use rank::{SCORE_TIE_WINDOW, quality_score, select_best_place};
pub use report::{AmenityReporter, CollectedReport};
pub use search::{FinalizeTrigger, ResolveError, Resolution, Resolver};
