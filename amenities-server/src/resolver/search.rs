//! Concurrent category search with debounced settling.
//!
//! Every category is searched concurrently. Results are accepted as they
//! arrive; once no result has arrived for the settle period and every
//! category has reported, the search finalizes. A hard ceiling finalizes
//! with whatever has arrived if some categories never answer. Either way
//! finalization happens exactly once, and results arriving afterwards are
//! discarded.

use std::pin::Pin;

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::time::Sleep;
use tracing::{debug, info, warn};

use crate::domain::{Amenity, AmenityKind, Coordinates, PlaceCandidate, PlaceSearch};
use crate::matcher::filter_places;

use super::config::{DispatchMode, ResolverConfig};
use super::dedup::AmenitySet;
use super::finalize::{drop_distant, finalize_amenities};
use super::provider::{PlacesProvider, TravelTimeMatrix, TravelTimeProvider};
use super::rank::select_best_place;
use super::report::AmenityReporter;

/// Why a search produced no amenities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Every category answered and nothing survived filtering.
    #[error("No nearby amenities found.")]
    NothingFound,

    /// The ceiling fired before every category answered.
    #[error("Unable to load amenities. Check API settings.")]
    Incomplete,
}

/// What ended the category phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizeTrigger {
    /// Every category reported and the settle period elapsed.
    Completion,
    /// The ceiling fired first.
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Searching,
    Finalizing(FinalizeTrigger),
}

/// Mutable state of one search, owned by the resolver task.
#[derive(Debug)]
struct SearchState {
    amenities: AmenitySet,
    categories_completed: usize,
    categories_expected: usize,
    phase: Phase,
}

impl SearchState {
    fn new(categories_expected: usize) -> Self {
        Self {
            amenities: AmenitySet::new(),
            categories_completed: 0,
            categories_expected,
            phase: Phase::Searching,
        }
    }

    /// Record one category's outcome. Ignored once finalization has begun.
    fn record(&mut self, kind: AmenityKind, candidate: Option<PlaceCandidate>) {
        if self.phase != Phase::Searching {
            debug!(category = %kind, "discarding late category result");
            return;
        }

        self.categories_completed += 1;
        match candidate {
            Some(place) => {
                let accepted = self.amenities.add(Amenity::from_candidate(&place, kind));
                debug!(category = %kind, name = %place.name, accepted, "category reported");
            }
            None => debug!(category = %kind, "category reported nothing"),
        }
    }

    fn all_reported(&self) -> bool {
        self.categories_completed >= self.categories_expected
    }

    /// Latch the phase. Returns false if finalization already began.
    fn begin_finalize(&mut self, trigger: FinalizeTrigger) -> bool {
        if self.phase != Phase::Searching {
            return false;
        }
        self.phase = Phase::Finalizing(trigger);
        true
    }
}

/// Outcome of one resolver run.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub outcome: Result<Vec<Amenity>, ResolveError>,
    pub trigger: FinalizeTrigger,
    pub categories_completed: usize,
}

impl Resolution {
    /// Hand the outcome to a reporter. Calls exactly one reporter method.
    pub fn report<R: AmenityReporter + ?Sized>(&self, reporter: &mut R) {
        match &self.outcome {
            Ok(amenities) => reporter.render_amenities(amenities),
            Err(e) => reporter.render_error(&e.to_string()),
        }
    }
}

type CategoryBatch = Vec<(AmenityKind, Option<PlaceCandidate>)>;

/// Resolves the nearby amenities of a point.
pub struct Resolver<'a, P: PlacesProvider, T: TravelTimeProvider> {
    places: &'a P,
    travel: &'a T,
    config: &'a ResolverConfig,
}

impl<'a, P: PlacesProvider, T: TravelTimeProvider> Resolver<'a, P, T> {
    pub fn new(places: &'a P, travel: &'a T, config: &'a ResolverConfig) -> Self {
        Self {
            places,
            travel,
            config,
        }
    }

    /// Run a search and pass the outcome to `reporter`.
    pub async fn run<R: AmenityReporter + ?Sized>(&self, at: Coordinates, reporter: &mut R) -> Resolution {
        let resolution = self.resolve(at).await;
        resolution.report(reporter);
        resolution
    }

    /// Run a search around `at`.
    pub async fn resolve(&self, at: Coordinates) -> Resolution {
        let mut state = SearchState::new(AmenityKind::ALL.len());

        let trigger = self.search_categories(at, &mut state).await;
        state.begin_finalize(trigger);

        let categories_completed = state.categories_completed;
        let all_reported = state.all_reported();

        let amenities = drop_distant(state.amenities.into_vec(), &at, self.config.max_distance_km);
        let amenities = if amenities.is_empty() {
            amenities
        } else {
            let matrix = self.lookup_travel_times(at, &amenities).await;
            finalize_amenities(amenities, &at, matrix.as_ref(), self.config)
        };

        let outcome = if amenities.is_empty() {
            Err(if all_reported {
                ResolveError::NothingFound
            } else {
                ResolveError::Incomplete
            })
        } else {
            Ok(amenities)
        };

        info!(
            %at,
            ?trigger,
            categories_completed,
            results = outcome.as_ref().map_or(0, Vec::len),
            "amenity search finished"
        );

        Resolution {
            outcome,
            trigger,
            categories_completed,
        }
    }

    /// Drive the category searches until they settle or the ceiling fires.
    async fn search_categories(&self, at: Coordinates, state: &mut SearchState) -> FinalizeTrigger {
        let mut pending = self.dispatch(at);

        let ceiling = tokio::time::sleep(self.config.ceiling());
        tokio::pin!(ceiling);
        let mut settle: Option<Pin<Box<Sleep>>> = None;

        loop {
            tokio::select! {
                biased;

                () = &mut ceiling => {
                    warn!(
                        categories_completed = state.categories_completed,
                        "category search reached the time ceiling"
                    );
                    return FinalizeTrigger::Timeout;
                }

                Some(batch) = pending.next(), if !pending.is_empty() => {
                    for (kind, candidate) in batch {
                        state.record(kind, candidate);
                    }
                    settle = Some(Box::pin(tokio::time::sleep(self.config.settle_debounce())));
                }

                () = settled(&mut settle), if settle.is_some() => {
                    settle = None;
                    if state.all_reported() {
                        return FinalizeTrigger::Completion;
                    }
                }
            }
        }
    }

    fn dispatch(&self, at: Coordinates) -> FuturesUnordered<BoxFuture<'a, CategoryBatch>> {
        let places = self.places;
        let window = self.config.rank_window;
        let pending = FuturesUnordered::new();

        match self.config.dispatch {
            DispatchMode::PerCategory => {
                for kind in AmenityKind::ALL {
                    pending.push(
                        async move { vec![(kind, search_category(places, at, kind, window).await)] }
                            .boxed(),
                    );
                }
            }
            DispatchMode::Batched => pending.push(search_batched(places, at, window).boxed()),
        }

        pending
    }

    async fn lookup_travel_times(
        &self,
        at: Coordinates,
        amenities: &[Amenity],
    ) -> Option<TravelTimeMatrix> {
        let destinations: Vec<Coordinates> = amenities.iter().map(|a| a.location).collect();
        let lookup = self.travel.batch_travel_times(at, &destinations);

        match tokio::time::timeout(self.config.travel_time_timeout(), lookup).await {
            Ok(Ok(matrix)) => Some(matrix),
            Ok(Err(e)) => {
                warn!(error = %e, "travel time lookup failed, estimating walking times");
                None
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.config.travel_time_timeout_ms,
                    "travel time lookup timed out, estimating walking times"
                );
                None
            }
        }
    }
}

/// Resolves when the settle timer fires; never resolves while it is unset.
async fn settled(timer: &mut Option<Pin<Box<Sleep>>>) {
    match timer {
        Some(sleep) => sleep.as_mut().await,
        None => std::future::pending().await,
    }
}

/// Search one category: text search first where the category has a query,
/// falling back to a nearby search when that yields no admissible place.
async fn search_category<P: PlacesProvider>(
    places: &P,
    at: Coordinates,
    kind: AmenityKind,
    window: usize,
) -> Option<PlaceCandidate> {
    if let Some(query) = kind.text_query() {
        match places.search_by_text(at, query).await {
            Ok(search) => {
                if let Some(place) = pick(search, kind, window) {
                    return Some(place);
                }
                debug!(category = %kind, query, "text search found nothing, trying nearby search");
            }
            Err(e) => {
                debug!(category = %kind, error = %e, "text search failed, trying nearby search");
            }
        }
    }

    match places.search_nearby(at, kind).await {
        Ok(search) => pick(search, kind, window),
        Err(e) => {
            warn!(category = %kind, error = %e, "places search failed");
            None
        }
    }
}

/// Search every category in one provider call.
async fn search_batched<P: PlacesProvider>(
    places: &P,
    at: Coordinates,
    window: usize,
) -> CategoryBatch {
    let mut results = match places.search_all(at, &AmenityKind::ALL).await {
        Ok(results) => results,
        Err(e) => {
            warn!(error = %e, "batched places search failed");
            Default::default()
        }
    };

    AmenityKind::ALL
        .into_iter()
        .map(|kind| {
            let place = results.remove(&kind).and_then(|search| pick(search, kind, window));
            (kind, place)
        })
        .collect()
}

fn pick(search: PlaceSearch, kind: AmenityKind, window: usize) -> Option<PlaceCandidate> {
    let filtered = filter_places(&search.into_candidates(), kind);
    select_best_place(&filtered, kind, window).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinates;

    fn place(name: &str) -> PlaceCandidate {
        PlaceCandidate::new(name, Coordinates { lat: 22.57, lng: 88.36 })
    }

    #[test]
    fn finalize_latch_fires_once() {
        let mut state = SearchState::new(6);
        assert!(state.begin_finalize(FinalizeTrigger::Timeout));
        assert!(!state.begin_finalize(FinalizeTrigger::Completion));
        assert_eq!(state.phase, Phase::Finalizing(FinalizeTrigger::Timeout));
    }

    #[test]
    fn late_results_are_ignored() {
        let mut state = SearchState::new(6);
        state.record(AmenityKind::Bank, Some(place("First Bank")));
        state.begin_finalize(FinalizeTrigger::Completion);
        state.record(AmenityKind::School, Some(place("Late School")));

        assert_eq!(state.categories_completed, 1);
        assert_eq!(state.amenities.len(), 1);
    }

    #[test]
    fn empty_categories_still_count_as_reported() {
        let mut state = SearchState::new(2);
        state.record(AmenityKind::Bank, None);
        assert!(!state.all_reported());
        state.record(AmenityKind::School, None);
        assert!(state.all_reported());
        assert!(state.amenities.is_empty());
    }

    #[test]
    fn pick_filters_before_selecting() {
        let search = PlaceSearch::found(vec![place("City Pharmacy"), place("General Hospital")]);
        let picked = pick(search, AmenityKind::Hospital, 15).unwrap();
        assert_eq!(picked.name, "General Hospital");
    }

    #[test]
    fn pick_ignores_failed_search() {
        let mut search = PlaceSearch::failed();
        search.results.push(place("General Hospital"));
        assert!(pick(search, AmenityKind::Hospital, 15).is_none());
    }

    #[test]
    fn error_messages() {
        assert_eq!(ResolveError::NothingFound.to_string(), "No nearby amenities found.");
        assert_eq!(
            ResolveError::Incomplete.to_string(),
            "Unable to load amenities. Check API settings."
        );
    }
}
