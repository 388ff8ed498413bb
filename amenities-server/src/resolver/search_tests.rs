//! Scenario tests for the resolver, driven by scripted providers on a
//! paused clock.

use super::*;
use crate::domain::{AmenityKind, Coordinates, DurationSource, PlaceCandidate, PlaceSearch, TravelTime};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

const HOME: Coordinates = Coordinates { lat: 22.57, lng: 88.36 };

/// A point `km` kilometres due north of `HOME`.
fn north(km: f64) -> Coordinates {
    Coordinates {
        lat: HOME.lat + km / 111.195,
        lng: HOME.lng,
    }
}

fn place(name: &str, location: Coordinates) -> PlaceCandidate {
    PlaceCandidate::new(name, location)
}

/// Places provider with per-category results, latencies and failures.
#[derive(Default)]
struct MockPlaces {
    nearby: HashMap<AmenityKind, Vec<PlaceCandidate>>,
    text: HashMap<AmenityKind, Vec<PlaceCandidate>>,
    delays: HashMap<AmenityKind, Duration>,
    failing: HashSet<AmenityKind>,
    calls: Mutex<Vec<String>>,
}

impl MockPlaces {
    fn new() -> Self {
        Self::default()
    }

    fn nearby(mut self, kind: AmenityKind, places: Vec<PlaceCandidate>) -> Self {
        self.nearby.insert(kind, places);
        self
    }

    fn text(mut self, kind: AmenityKind, places: Vec<PlaceCandidate>) -> Self {
        self.text.insert(kind, places);
        self
    }

    fn delay(mut self, kind: AmenityKind, delay: Duration) -> Self {
        self.delays.insert(kind, delay);
        self
    }

    fn failing(mut self, kind: AmenityKind) -> Self {
        self.failing.insert(kind);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn respond(
        &self,
        call: String,
        kind: AmenityKind,
        results: Option<&Vec<PlaceCandidate>>,
    ) -> Result<PlaceSearch, ProviderError> {
        self.calls.lock().unwrap().push(call);
        if let Some(delay) = self.delays.get(&kind) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&kind) {
            return Err(ProviderError::Transport("connection reset".to_string()));
        }
        Ok(PlaceSearch::found(results.cloned().unwrap_or_default()))
    }
}

impl PlacesProvider for MockPlaces {
    async fn search_nearby(
        &self,
        _at: Coordinates,
        kind: AmenityKind,
    ) -> Result<PlaceSearch, ProviderError> {
        self.respond(format!("nearby:{kind}"), kind, self.nearby.get(&kind)).await
    }

    async fn search_by_text(
        &self,
        _at: Coordinates,
        query: &str,
    ) -> Result<PlaceSearch, ProviderError> {
        let kind = AmenityKind::ALL
            .into_iter()
            .find(|k| k.text_query() == Some(query))
            .unwrap();
        self.respond(format!("text:{kind}"), kind, self.text.get(&kind)).await
    }
}

/// Travel-time provider answering per destination.
#[derive(Default)]
struct MockTravel {
    routes: Vec<(Coordinates, Option<&'static str>, Option<&'static str>)>,
    delay: Duration,
    fail: bool,
    calls: Mutex<Vec<(TravelMode, usize)>>,
}

impl MockTravel {
    fn new() -> Self {
        Self::default()
    }

    fn route(mut self, to: Coordinates, walking: Option<&'static str>, driving: Option<&'static str>) -> Self {
        self.routes.push((to, walking, driving));
        self
    }

    fn calls(&self) -> Vec<(TravelMode, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

impl TravelTimeProvider for MockTravel {
    async fn travel_times(
        &self,
        _origin: Coordinates,
        destinations: &[Coordinates],
        mode: TravelMode,
    ) -> Result<Vec<RouteElement>, ProviderError> {
        self.calls.lock().unwrap().push((mode, destinations.len()));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(ProviderError::Denied("REQUEST_DENIED".to_string()));
        }

        Ok(destinations
            .iter()
            .map(|d| {
                self.routes
                    .iter()
                    .find(|(to, _, _)| to == d)
                    .and_then(|(_, walking, driving)| match mode {
                        TravelMode::Walking => *walking,
                        TravelMode::Driving => *driving,
                    })
                    .map_or(RouteElement::Unavailable, RouteElement::ok)
            })
            .collect())
    }
}

/// One admissible place per category, nearest first by category order.
fn full_neighbourhood() -> MockPlaces {
    MockPlaces::new()
        .nearby(AmenityKind::RailStation, vec![place("Sealdah Station", north(0.1))])
        .nearby(AmenityKind::SubwayStation, vec![place("Park Street Metro Station", north(0.2))])
        .nearby(AmenityKind::Hospital, vec![place("City Hospital", north(0.3))])
        .nearby(AmenityKind::School, vec![place("St. Xavier's School", north(0.4))])
        .nearby(AmenityKind::Bank, vec![place("State Bank", north(0.5))])
        .nearby(AmenityKind::University, vec![place("Presidency University", north(0.6))])
}

/// Paused-clock timers land on millisecond ticks.
fn assert_elapsed(started: Instant, expected: Duration) {
    let elapsed = started.elapsed();
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(50),
        "expected about {expected:?}, got {elapsed:?}"
    );
}

fn names(resolution: &Resolution) -> Vec<&str> {
    resolution
        .outcome
        .as_ref()
        .unwrap()
        .iter()
        .map(|a| a.name.as_str())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn resolves_hospital_and_bank_in_travel_order() {
    let hospital = north(0.5);
    let bank = north(1.8);
    let places = MockPlaces::new()
        .text(AmenityKind::Hospital, vec![place("City Hospital", hospital)])
        .nearby(AmenityKind::Bank, vec![place("State Bank", bank)]);
    let travel = MockTravel::new()
        .route(hospital, Some("8 mins"), Some("3 mins"))
        .route(bank, Some("45 mins"), Some("12 mins"));
    let config = ResolverConfig::default();

    let resolution = Resolver::new(&places, &travel, &config).resolve(HOME).await;

    assert_eq!(resolution.trigger, FinalizeTrigger::Completion);
    assert_eq!(resolution.categories_completed, 6);
    assert_eq!(names(&resolution), ["City Hospital", "State Bank"]);

    let amenities = resolution.outcome.unwrap();
    assert_eq!(amenities[0].icon, "🏥");
    assert_eq!(amenities[0].walking(), &TravelTime::routed(8, "8 mins"));
    assert_eq!(amenities[0].driving(), &TravelTime::routed(3, "3 mins"));
    assert_eq!(amenities[1].walking(), &TravelTime::NotAvailable);
    assert_eq!(amenities[1].driving(), &TravelTime::routed(12, "12 mins"));
}

#[tokio::test(start_paused = true)]
async fn completion_waits_for_settle_period() {
    let places = full_neighbourhood();
    let travel = MockTravel::new();
    let config = ResolverConfig::default();

    let started = Instant::now();
    let resolution = Resolver::new(&places, &travel, &config).resolve(HOME).await;

    assert_elapsed(started, Duration::from_millis(300));
    assert_eq!(resolution.trigger, FinalizeTrigger::Completion);
}

#[tokio::test(start_paused = true)]
async fn slow_category_extends_the_search() {
    let places = full_neighbourhood().delay(AmenityKind::Bank, Duration::from_secs(1));
    let travel = MockTravel::new();
    let config = ResolverConfig::default();

    let started = Instant::now();
    let resolution = Resolver::new(&places, &travel, &config).resolve(HOME).await;

    // settles 300ms after the last category
    assert_elapsed(started, Duration::from_millis(1300));
    assert_eq!(resolution.trigger, FinalizeTrigger::Completion);
    assert_eq!(resolution.categories_completed, 6);
    assert!(names(&resolution).contains(&"State Bank"));
}

#[tokio::test(start_paused = true)]
async fn ceiling_finalizes_with_partial_results() {
    let stall = Duration::from_secs(60);
    let places = MockPlaces::new()
        .text(AmenityKind::Hospital, vec![place("City Hospital", north(0.5))])
        .delay(AmenityKind::RailStation, stall)
        .delay(AmenityKind::SubwayStation, stall)
        .delay(AmenityKind::School, stall)
        .delay(AmenityKind::University, stall);
    let travel = MockTravel::new().route(north(0.5), Some("8 mins"), Some("3 mins"));
    let config = ResolverConfig::default();

    let started = Instant::now();
    let resolution = Resolver::new(&places, &travel, &config).resolve(HOME).await;

    assert_elapsed(started, Duration::from_secs(15));
    assert_eq!(resolution.trigger, FinalizeTrigger::Timeout);
    assert_eq!(resolution.categories_completed, 2);
    assert_eq!(names(&resolution), ["City Hospital"]);
}

#[tokio::test(start_paused = true)]
async fn ceiling_with_nothing_reports_load_failure() {
    let mut places = MockPlaces::new();
    for kind in AmenityKind::ALL {
        places = places.delay(kind, Duration::from_secs(60));
    }
    let travel = MockTravel::new();
    let config = ResolverConfig::default();
    let mut report = CollectedReport::default();

    let resolution = Resolver::new(&places, &travel, &config)
        .run(HOME, &mut report)
        .await;

    assert_eq!(resolution.trigger, FinalizeTrigger::Timeout);
    assert_eq!(resolution.outcome, Err(ResolveError::Incomplete));
    assert_eq!(
        report,
        CollectedReport::Error("Unable to load amenities. Check API settings.".to_string())
    );
    assert!(travel.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn empty_neighbourhood_reports_nothing_found() {
    let places = MockPlaces::new();
    let travel = MockTravel::new();
    let config = ResolverConfig::default();
    let mut report = CollectedReport::default();

    let resolution = Resolver::new(&places, &travel, &config)
        .run(HOME, &mut report)
        .await;

    assert_eq!(resolution.trigger, FinalizeTrigger::Completion);
    assert_eq!(resolution.outcome, Err(ResolveError::NothingFound));
    assert_eq!(report, CollectedReport::Error("No nearby amenities found.".to_string()));
}

#[tokio::test(start_paused = true)]
async fn filtered_out_candidates_report_nothing_found() {
    let places = MockPlaces::new()
        .nearby(AmenityKind::Hospital, vec![place("Apollo Pharmacy", north(0.2))])
        .nearby(AmenityKind::School, vec![place("Sunrise Driving School", north(0.3))]);
    let travel = MockTravel::new();
    let config = ResolverConfig::default();

    let resolution = Resolver::new(&places, &travel, &config).resolve(HOME).await;

    assert_eq!(resolution.outcome, Err(ResolveError::NothingFound));
}

#[tokio::test(start_paused = true)]
async fn travel_lookup_failure_estimates_walking() {
    let places = MockPlaces::new().nearby(AmenityKind::Bank, vec![place("State Bank", north(0.5))]);
    let travel = MockTravel {
        fail: true,
        ..MockTravel::new()
    };
    let config = ResolverConfig::default();

    let resolution = Resolver::new(&places, &travel, &config).resolve(HOME).await;

    let amenities = resolution.outcome.unwrap();
    assert_eq!(amenities.len(), 1);
    let TravelTime::Available(walk) = amenities[0].walking() else {
        panic!("expected an estimated walk");
    };
    // 0.5 / 0.083 * 1.2 = 7.2
    assert_eq!(walk.minutes, 7);
    assert_eq!(walk.source, DurationSource::Estimated);
    assert_eq!(amenities[0].driving(), &TravelTime::NotAvailable);
}

#[tokio::test(start_paused = true)]
async fn stalled_travel_lookup_is_bounded() {
    let places = MockPlaces::new().nearby(AmenityKind::Bank, vec![place("State Bank", north(0.5))]);
    let travel = MockTravel {
        delay: Duration::from_secs(120),
        ..MockTravel::new()
    };
    let config = ResolverConfig::default();

    let started = Instant::now();
    let resolution = Resolver::new(&places, &travel, &config).resolve(HOME).await;

    assert_elapsed(started, Duration::from_millis(5_300));
    let amenities = resolution.outcome.unwrap();
    assert_eq!(amenities[0].walking().minutes(), Some(7));
    assert_eq!(amenities[0].driving(), &TravelTime::NotAvailable);
}

#[tokio::test(start_paused = true)]
async fn distant_amenities_are_not_routed() {
    let places = MockPlaces::new()
        .nearby(AmenityKind::Bank, vec![place("State Bank", north(1.0))])
        .nearby(AmenityKind::School, vec![place("Hill School", north(2.5))]);
    let travel = MockTravel::new();
    let config = ResolverConfig::default();

    let resolution = Resolver::new(&places, &travel, &config).resolve(HOME).await;

    assert_eq!(names(&resolution), ["State Bank"]);
    assert_eq!(
        travel.calls(),
        [(TravelMode::Walking, 1), (TravelMode::Driving, 1)]
    );
}

#[tokio::test(start_paused = true)]
async fn text_search_falls_back_to_nearby() {
    let places = MockPlaces::new()
        .text(AmenityKind::Hospital, vec![place("Apollo Pharmacy", north(0.1))])
        .nearby(AmenityKind::Hospital, vec![place("District Hospital", north(0.4))]);
    let travel = MockTravel::new();
    let config = ResolverConfig::default();

    let resolution = Resolver::new(&places, &travel, &config).resolve(HOME).await;

    assert_eq!(names(&resolution), ["District Hospital"]);
    let calls = places.calls();
    assert!(calls.contains(&"text:hospital".to_string()));
    assert!(calls.contains(&"nearby:hospital".to_string()));
    assert!(!calls.contains(&"text:bank".to_string()));
}

#[tokio::test(start_paused = true)]
async fn provider_errors_do_not_block_other_categories() {
    let places = full_neighbourhood()
        .failing(AmenityKind::Bank)
        .failing(AmenityKind::School);
    let travel = MockTravel::new();
    let config = ResolverConfig::default();

    let resolution = Resolver::new(&places, &travel, &config).resolve(HOME).await;

    assert_eq!(resolution.trigger, FinalizeTrigger::Completion);
    assert_eq!(resolution.categories_completed, 6);
    let found = names(&resolution);
    assert!(!found.contains(&"State Bank"));
    assert!(found.contains(&"City Hospital"));
}

#[tokio::test(start_paused = true)]
async fn duplicate_station_kept_once() {
    let station = north(0.3);
    let places = MockPlaces::new()
        .text(AmenityKind::RailStation, vec![place("Sealdah Station", station)])
        .text(AmenityKind::SubwayStation, vec![place("sealdah station", station)]);
    let travel = MockTravel::new();
    let config = ResolverConfig::default();

    let resolution = Resolver::new(&places, &travel, &config).resolve(HOME).await;

    assert_eq!(resolution.outcome.unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn results_capped_and_sorted() {
    let places = full_neighbourhood();
    let travel = MockTravel::new();
    let config = ResolverConfig::default();

    let resolution = Resolver::new(&places, &travel, &config).resolve(HOME).await;

    // Estimated walks: 1, 3, 4, 6, 7 and 9 minutes
    assert_eq!(
        names(&resolution),
        [
            "Sealdah Station",
            "Park Street Metro Station",
            "City Hospital",
            "St. Xavier's School",
            "State Bank",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn batched_dispatch_completes_every_category_at_once() {
    let places = full_neighbourhood();
    let travel = MockTravel::new();
    let config = ResolverConfig::default().with_dispatch(DispatchMode::Batched);

    let started = Instant::now();
    let resolution = Resolver::new(&places, &travel, &config).resolve(HOME).await;

    assert_elapsed(started, Duration::from_millis(300));
    assert_eq!(resolution.trigger, FinalizeTrigger::Completion);
    assert_eq!(resolution.categories_completed, 6);
    assert_eq!(names(&resolution).len(), 5);
    assert!(places.calls().iter().all(|c| c.starts_with("nearby:")));
}

#[tokio::test(start_paused = true)]
async fn travel_times_requested_once() {
    let places = full_neighbourhood()
        .delay(AmenityKind::School, Duration::from_millis(200))
        .delay(AmenityKind::Bank, Duration::from_millis(450));
    let travel = MockTravel::new();
    let config = ResolverConfig::default();

    Resolver::new(&places, &travel, &config).resolve(HOME).await;

    assert_eq!(
        travel.calls(),
        [(TravelMode::Walking, 6), (TravelMode::Driving, 6)]
    );
}

/// Counts reporter calls.
#[derive(Default)]
struct CountingReporter {
    amenities: usize,
    errors: usize,
}

impl AmenityReporter for CountingReporter {
    fn render_amenities(&mut self, _amenities: &[crate::domain::Amenity]) {
        self.amenities += 1;
    }

    fn render_error(&mut self, _message: &str) {
        self.errors += 1;
    }
}

#[tokio::test(start_paused = true)]
async fn reporter_called_exactly_once() {
    let places = full_neighbourhood();
    let travel = MockTravel::new();
    let config = ResolverConfig::default();
    let mut reporter = CountingReporter::default();

    Resolver::new(&places, &travel, &config)
        .run(HOME, &mut reporter)
        .await;

    assert_eq!((reporter.amenities, reporter.errors), (1, 0));
}
