//! The deduplicated amenity set built up during a search.

use crate::domain::{Amenity, AmenityKind, normalize_name};

/// Two amenities closer than this in both latitude and longitude (degrees)
/// are at the same location.
pub const LOCATION_TOLERANCE_DEG: f64 = 0.0001;

/// Names whose lengths differ by this much or more are never similar.
const MAX_NAME_LENGTH_GAP: usize = 10;

/// Whether two amenities describe the same real-world place.
///
/// The names must match (exactly, or one containing the other with a small
/// length difference) and the locations must agree within
/// [`LOCATION_TOLERANCE_DEG`].
pub fn is_duplicate(a: &Amenity, b: &Amenity) -> bool {
    if !a.location.within_degrees(&b.location, LOCATION_TOLERANCE_DEG) {
        return false;
    }

    let a_name = normalize_name(&a.name);
    let b_name = normalize_name(&b.name);
    if a_name == b_name {
        return true;
    }

    let gap = a_name.chars().count().abs_diff(b_name.chars().count());
    (a_name.contains(&b_name) || b_name.contains(&a_name)) && gap < MAX_NAME_LENGTH_GAP
}

/// Amenities accepted so far, at most one per category, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct AmenitySet {
    amenities: Vec<Amenity>,
}

impl AmenitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an amenity. Returns false if it duplicates an existing entry or
    /// its category is already represented.
    pub fn add(&mut self, amenity: Amenity) -> bool {
        if self.contains_kind(amenity.kind) {
            return false;
        }
        if self.amenities.iter().any(|existing| is_duplicate(existing, &amenity)) {
            return false;
        }
        self.amenities.push(amenity);
        true
    }

    pub fn contains_kind(&self, kind: AmenityKind) -> bool {
        self.amenities.iter().any(|a| a.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.amenities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amenities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Amenity> {
        self.amenities.iter()
    }

    pub fn into_vec(self) -> Vec<Amenity> {
        self.amenities
    }
}
