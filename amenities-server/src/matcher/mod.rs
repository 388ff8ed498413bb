//! Name-based category matching.
//!
//! Places searches are noisy: a "hospital" search returns pharmacies and
//! diagnostic labs, a "subway station" search returns watch shops near the
//! station. Each category has a strict name rule and, for some categories,
//! a relaxed rule used only when the strict rule rejects everything.

mod rules;

pub use rules::{CategoryRule, NamePredicate, rule_for};

use tracing::debug;

use crate::domain::{AmenityKind, PlaceCandidate};

/// Keep the candidates whose names fit `kind`.
///
/// Order is preserved and the result is never longer than the input. If
/// the strict rule keeps nothing and the category has a relaxed rule, the
/// relaxed rule is applied to the full input instead.
pub fn filter_places(places: &[PlaceCandidate], kind: AmenityKind) -> Vec<PlaceCandidate> {
    if places.is_empty() {
        return Vec::new();
    }

    let rule = rule_for(kind);
    let keys: Vec<String> = places.iter().map(PlaceCandidate::match_key).collect();

    let strict = select(places, &keys, rule.strict);
    if !strict.is_empty() {
        return strict;
    }

    match rule.relaxed {
        Some(relaxed) => {
            debug!(category = %kind, candidates = places.len(), "strict rule kept nothing, relaxing");
            select(places, &keys, relaxed)
        }
        None => strict,
    }
}

fn select(places: &[PlaceCandidate], keys: &[String], keep: NamePredicate) -> Vec<PlaceCandidate> {
    places
        .iter()
        .zip(keys)
        .filter(|(_, key)| keep(key))
        .map(|(place, _)| place.clone())
        .collect()
}
