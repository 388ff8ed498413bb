//! Resolved amenities and their travel times.

use std::fmt;

use crate::geo::UNREACHABLE_MINUTES;

use super::{AmenityKind, Coordinates, PlaceCandidate};

/// Where a travel duration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationSource {
    /// Reported by the routing service.
    Routed,
    /// Estimated from straight-line distance.
    Estimated,
}

/// A known travel duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelDuration {
    /// Whole minutes, as parsed from `text`.
    pub minutes: u32,
    /// Human-readable form, e.g. `"1 hour 5 mins"`.
    pub text: String,
    pub source: DurationSource,
}

/// Travel time for one mode.
///
/// Starts as `Pending` and resolves exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TravelTime {
    #[default]
    Pending,
    NotAvailable,
    Available(TravelDuration),
}

impl TravelTime {
    /// A duration reported by the routing service.
    pub fn routed(minutes: u32, text: impl Into<String>) -> Self {
        TravelTime::Available(TravelDuration {
            minutes,
            text: text.into(),
            source: DurationSource::Routed,
        })
    }

    /// A duration estimated locally.
    pub fn estimated(minutes: u32, text: impl Into<String>) -> Self {
        TravelTime::Available(TravelDuration {
            minutes,
            text: text.into(),
            source: DurationSource::Estimated,
        })
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, TravelTime::Pending)
    }

    /// Minutes if available.
    pub fn minutes(&self) -> Option<u32> {
        match self {
            TravelTime::Available(d) => Some(d.minutes),
            _ => None,
        }
    }

    /// Minutes for ordering; anything unavailable sorts last.
    pub fn sort_minutes(&self) -> u32 {
        self.minutes().unwrap_or(UNREACHABLE_MINUTES)
    }

    /// Whether a known duration is within `ceiling` minutes.
    pub fn within(&self, ceiling: u32) -> bool {
        self.minutes().is_some_and(|m| m <= ceiling)
    }
}

impl fmt::Display for TravelTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelTime::Pending => f.write_str("Calculating..."),
            TravelTime::NotAvailable => f.write_str("N/A"),
            TravelTime::Available(d) => f.write_str(&d.text),
        }
    }
}

/// A deduplicated, category-tagged place with travel times.
#[derive(Debug, Clone, PartialEq)]
pub struct Amenity {
    pub name: String,
    pub kind: AmenityKind,
    pub icon: &'static str,
    pub category_name: &'static str,
    pub location: Coordinates,
    walking: TravelTime,
    driving: TravelTime,
}

impl Amenity {
    /// Create an amenity from a selected candidate. Both legs start pending.
    pub fn from_candidate(place: &PlaceCandidate, kind: AmenityKind) -> Self {
        let category = kind.category();
        Self {
            name: place.name.clone(),
            kind,
            icon: category.icon,
            category_name: category.display_name,
            location: place.location,
            walking: TravelTime::Pending,
            driving: TravelTime::Pending,
        }
    }

    pub fn walking(&self) -> &TravelTime {
        &self.walking
    }

    pub fn driving(&self) -> &TravelTime {
        &self.driving
    }

    /// Resolve the walking leg. Returns false if it was already resolved.
    pub fn resolve_walking(&mut self, time: TravelTime) -> bool {
        resolve_once(&mut self.walking, time)
    }

    /// Resolve the driving leg. Returns false if it was already resolved.
    pub fn resolve_driving(&mut self, time: TravelTime) -> bool {
        resolve_once(&mut self.driving, time)
    }

    /// Whether either leg is still waiting for data.
    pub fn is_pending(&self) -> bool {
        self.walking.is_pending() || self.driving.is_pending()
    }
}

fn resolve_once(slot: &mut TravelTime, time: TravelTime) -> bool {
    if !slot.is_pending() || time.is_pending() {
        return false;
    }
    *slot = time;
    true
}
