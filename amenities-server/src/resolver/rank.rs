//! Quality ranking for candidate places.
//!
//! Transit stops, hospitals and banks use the nearest admissible place.
//! Schools and colleges prefer well-rated places with enough reviews to
//! trust the rating, looking only at the nearest few candidates.

use crate::domain::{AmenityKind, PlaceCandidate};

/// Scores closer than this count as a tie, broken by review count.
pub const SCORE_TIE_WINDOW: f64 = 20.0;

/// Points per rating star.
const RATING_WEIGHT: f64 = 30.0;

/// Upper bound on the review bonus.
const MAX_REVIEW_BONUS: f64 = 60.0;

/// Quality score: `rating * 30 + min(reviews / 3, 60)`.
///
/// Missing rating or review count counts as zero.
pub fn quality_score(place: &PlaceCandidate) -> f64 {
    let rating = place.rating.unwrap_or(0.0);
    let reviews = f64::from(place.review_count.unwrap_or(0));
    rating * RATING_WEIGHT + (reviews / 3.0).min(MAX_REVIEW_BONUS)
}

/// Pick one place from a filtered, nearest-first candidate list.
///
/// For quality-ranked categories only the first `window` candidates are
/// considered. Returns `None` for an empty list.
pub fn select_best_place(
    candidates: &[PlaceCandidate],
    kind: AmenityKind,
    window: usize,
) -> Option<&PlaceCandidate> {
    if !kind.is_quality_ranked() {
        return candidates.first();
    }

    let window = &candidates[..candidates.len().min(window.max(1))];
    let mut best = window.first()?;
    let mut best_score = quality_score(best);

    for candidate in &window[1..] {
        let score = quality_score(candidate);
        if outranks(candidate, score, best, best_score) {
            best = candidate;
            best_score = score;
        }
    }

    Some(best)
}

/// Near-equal scores defer to the better-reviewed place; otherwise the
/// higher score wins. Full ties keep the incumbent, which is nearer.
fn outranks(
    challenger: &PlaceCandidate,
    challenger_score: f64,
    incumbent: &PlaceCandidate,
    incumbent_score: f64,
) -> bool {
    if (challenger_score - incumbent_score).abs() < SCORE_TIE_WINDOW {
        challenger.review_count.unwrap_or(0) > incumbent.review_count.unwrap_or(0)
    } else {
        challenger_score > incumbent_score
    }
}
