//! Raw place candidates returned by a places search.

use serde::{Deserialize, Serialize};

use crate::geo::haversine_km;

use super::Coordinates;

/// A place as returned by an external search, before filtering or ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub name: String,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub location: Coordinates,
}

impl PlaceCandidate {
    /// Create a candidate with no rating data.
    pub fn new(name: impl Into<String>, location: Coordinates) -> Self {
        Self {
            name: name.into(),
            rating: None,
            review_count: None,
            location,
        }
    }

    /// Attach rating and review count.
    pub fn with_rating(mut self, rating: f64, review_count: u32) -> Self {
        self.rating = Some(rating);
        self.review_count = Some(review_count);
        self
    }

    /// Trimmed, lowercased name used for all name matching.
    pub fn match_key(&self) -> String {
        normalize_name(&self.name)
    }
}

/// Normalize a place name for case-insensitive comparison.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Outcome status of a places search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchStatus {
    Ok,
    ZeroResults,
    Error,
}

/// The result of one places search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSearch {
    pub status: SearchStatus,
    pub results: Vec<PlaceCandidate>,
}

impl PlaceSearch {
    /// A successful search. An empty list is reported as `ZeroResults`.
    pub fn found(results: Vec<PlaceCandidate>) -> Self {
        let status = if results.is_empty() {
            SearchStatus::ZeroResults
        } else {
            SearchStatus::Ok
        };
        Self { status, results }
    }

    /// A search that returned nothing.
    pub fn empty() -> Self {
        Self {
            status: SearchStatus::ZeroResults,
            results: Vec::new(),
        }
    }

    /// A search that failed upstream.
    pub fn failed() -> Self {
        Self {
            status: SearchStatus::Error,
            results: Vec::new(),
        }
    }

    /// Order results nearest-first from `origin`. Equidistant places keep
    /// their relative order.
    pub fn sort_nearest_to(&mut self, origin: &Coordinates) {
        let mut ranked: Vec<(f64, PlaceCandidate)> = std::mem::take(&mut self.results)
            .into_iter()
            .map(|place| (haversine_km(origin, &place.location), place))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.results = ranked.into_iter().map(|(_, place)| place).collect();
    }

    /// Candidates usable by the resolver. Only `Ok` searches contribute.
    pub fn into_candidates(self) -> Vec<PlaceCandidate> {
        match self.status {
            SearchStatus::Ok => self.results,
            SearchStatus::ZeroResults | SearchStatus::Error => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn here() -> Coordinates {
        Coordinates { lat: 22.57, lng: 88.36 }
    }

    #[test]
    fn match_key_trims_and_lowercases() {
        let p = PlaceCandidate::new("  City HOSPITAL ", here());
        assert_eq!(p.match_key(), "city hospital");
    }

    #[test]
    fn found_with_no_results_is_zero_results() {
        assert_eq!(PlaceSearch::found(vec![]).status, SearchStatus::ZeroResults);
        assert_eq!(
            PlaceSearch::found(vec![PlaceCandidate::new("A", here())]).status,
            SearchStatus::Ok
        );
    }

    #[test]
    fn failed_search_contributes_nothing() {
        let mut search = PlaceSearch::failed();
        search.results.push(PlaceCandidate::new("Stray", here()));
        assert!(search.into_candidates().is_empty());
    }

    #[test]
    fn sorts_nearest_first_from_origin() {
        let west = PlaceCandidate::new("West", Coordinates { lat: 22.57, lng: 88.35 });
        let east = PlaceCandidate::new("East", Coordinates { lat: 22.57, lng: 88.37 });
        let mut search = PlaceSearch::found(vec![west, east]);

        search.sort_nearest_to(&Coordinates { lat: 22.57, lng: 88.369 });
        let names: Vec<_> = search.results.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["East", "West"]);

        search.sort_nearest_to(&Coordinates { lat: 22.57, lng: 88.351 });
        let names: Vec<_> = search.results.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["West", "East"]);
    }

    #[test]
    fn status_serializes_like_the_places_api() {
        let json = serde_json::to_string(&SearchStatus::ZeroResults).unwrap();
        assert_eq!(json, "\"ZERO_RESULTS\"");
    }
}
