//! Collaborator interfaces used by the resolver.
//!
//! The resolver never talks to a mapping service directly. Places and
//! travel times come through these traits so that the Google client, the
//! fixture-backed mock and the caching wrapper are interchangeable, and so
//! that tests can script latencies and failures.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;

use futures::future::join_all;

use crate::domain::{AmenityKind, Coordinates, PlaceSearch};

/// Error from a places or travel-time provider.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// The request did not complete (network, timeout, upstream status).
    #[error("request failed: {0}")]
    Transport(String),

    /// The response arrived but could not be understood.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The upstream service refused the request.
    #[error("request denied: {0}")]
    Denied(String),
}

/// Per-category results of a multi-category search.
pub type CategoryResults = BTreeMap<AmenityKind, PlaceSearch>;

/// Source of candidate places around a point.
pub trait PlacesProvider: Send + Sync {
    /// Places of one category near `at`, nearest first.
    fn search_nearby(
        &self,
        at: Coordinates,
        kind: AmenityKind,
    ) -> impl Future<Output = Result<PlaceSearch, ProviderError>> + Send;

    /// Free-text search biased towards `at`, nearest first.
    fn search_by_text(
        &self,
        at: Coordinates,
        query: &str,
    ) -> impl Future<Output = Result<PlaceSearch, ProviderError>> + Send;

    /// Nearby search for several categories at once.
    ///
    /// A category whose search fails is reported as a failed search rather
    /// than failing the whole call.
    fn search_all(
        &self,
        at: Coordinates,
        kinds: &[AmenityKind],
    ) -> impl Future<Output = Result<CategoryResults, ProviderError>> + Send {
        async move {
            let searches = kinds.iter().map(|&kind| async move {
                let search = match self.search_nearby(at, kind).await {
                    Ok(search) => search,
                    Err(e) => {
                        tracing::warn!(category = %kind, error = %e, "category search failed");
                        PlaceSearch::failed()
                    }
                };
                (kind, search)
            });
            Ok(join_all(searches).await.into_iter().collect())
        }
    }
}

/// Travel mode for a travel-time lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelMode {
    Walking,
    Driving,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Driving => "driving",
        }
    }

    /// Parse a mode name as used in routing requests.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "walking" => Some(TravelMode::Walking),
            "driving" => Some(TravelMode::Driving),
            _ => None,
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Travel time from the origin to one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteElement {
    /// A route exists; the duration is display text such as `"12 mins"`.
    Ok { duration_text: String },
    /// No route, or the service could not compute one.
    Unavailable,
}

impl RouteElement {
    pub fn ok(duration_text: impl Into<String>) -> Self {
        RouteElement::Ok {
            duration_text: duration_text.into(),
        }
    }

    pub fn duration_text(&self) -> Option<&str> {
        match self {
            RouteElement::Ok { duration_text } => Some(duration_text),
            RouteElement::Unavailable => None,
        }
    }
}

/// Walking and driving elements, index-aligned with the destinations.
///
/// Either list may be shorter than the destination list; missing entries
/// are treated as unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TravelTimeMatrix {
    pub walking: Vec<RouteElement>,
    pub driving: Vec<RouteElement>,
}

impl TravelTimeMatrix {
    pub fn walking_at(&self, index: usize) -> Option<&str> {
        self.walking.get(index).and_then(RouteElement::duration_text)
    }

    pub fn driving_at(&self, index: usize) -> Option<&str> {
        self.driving.get(index).and_then(RouteElement::duration_text)
    }
}

/// Source of travel times from one origin to many destinations.
pub trait TravelTimeProvider: Send + Sync {
    /// Travel times for one mode, index-aligned with `destinations`.
    fn travel_times(
        &self,
        origin: Coordinates,
        destinations: &[Coordinates],
        mode: TravelMode,
    ) -> impl Future<Output = Result<Vec<RouteElement>, ProviderError>> + Send;

    /// Walking and driving times in one logical call.
    fn batch_travel_times(
        &self,
        origin: Coordinates,
        destinations: &[Coordinates],
    ) -> impl Future<Output = Result<TravelTimeMatrix, ProviderError>> + Send {
        async move {
            let (walking, driving) = futures::try_join!(
                self.travel_times(origin, destinations, TravelMode::Walking),
                self.travel_times(origin, destinations, TravelMode::Driving),
            )?;
            Ok(TravelTimeMatrix { walking, driving })
        }
    }
}
