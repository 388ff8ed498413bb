//! Caching layer for places searches.
//!
//! Category searches around the same property repeat often (page reloads,
//! neighbouring listings) and the places they return change slowly. Results
//! are cached per query and coordinate bucket; travel times are not cached
//! because they depend on the exact origin.
//!
//! Coordinate bucketing (three decimal places, roughly 110 m) bounds cache
//! cardinality while keeping results relevant to the requested point.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{AmenityKind, Coordinates, PlaceSearch, SearchStatus};
use crate::resolver::{PlacesProvider, ProviderError};

/// What was searched for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum QueryKey {
    Nearby(AmenityKind),
    Text(String),
}

/// Cache key for searches: (query, latitude bucket, longitude bucket).
type SearchKey = (QueryKey, i64, i64);

/// Cached search entry.
type SearchEntry = Arc<PlaceSearch>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,

    /// Decimal places of latitude/longitude kept in the bucket.
    pub precision: u8,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 1000,
            precision: 3,
        }
    }
}

/// Cache for places search results.
pub struct PlacesCache {
    /// Searches keyed by (query, lat bucket, lng bucket).
    searches: MokaCache<SearchKey, SearchEntry>,

    /// 10^precision.
    scale: f64,
}

impl PlacesCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let searches = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            searches,
            scale: 10f64.powi(i32::from(config.precision)),
        }
    }

    /// Bucket a point to the configured precision.
    fn bucket(&self, at: &Coordinates) -> (i64, i64) {
        (
            (at.lat * self.scale).round() as i64,
            (at.lng * self.scale).round() as i64,
        )
    }

    fn key(&self, query: QueryKey, at: &Coordinates) -> SearchKey {
        let (lat, lng) = self.bucket(at);
        (query, lat, lng)
    }
}

/// Places provider with caching.
///
/// Wraps any `PlacesProvider` and caches successful searches. Failed
/// searches are never cached.
pub struct CachedPlacesClient<P> {
    inner: P,
    cache: PlacesCache,
}

impl<P: PlacesProvider> CachedPlacesClient<P> {
    /// Create a new cached client.
    pub fn new(inner: P, cache_config: &CacheConfig) -> Self {
        Self {
            inner,
            cache: PlacesCache::new(cache_config),
        }
    }

    /// The wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Hits are re-ordered from `at`, since the entry may have been stored
    /// for another point in the same bucket.
    async fn cached(
        &self,
        key: SearchKey,
        at: &Coordinates,
        fetch: impl Future<Output = Result<PlaceSearch, ProviderError>>,
    ) -> Result<PlaceSearch, ProviderError> {
        if let Some(cached) = self.cache.searches.get(&key).await {
            trace!(query = ?key.0, "places cache hit");
            let mut search = cached.as_ref().clone();
            search.sort_nearest_to(at);
            return Ok(search);
        }

        let search = fetch.await?;

        if search.status != SearchStatus::Error {
            self.cache.searches.insert(key, Arc::new(search.clone())).await;
        }

        Ok(search)
    }
}

impl<P: PlacesProvider> PlacesProvider for CachedPlacesClient<P> {
    async fn search_nearby(
        &self,
        at: Coordinates,
        kind: AmenityKind,
    ) -> Result<PlaceSearch, ProviderError> {
        let key = self.cache.key(QueryKey::Nearby(kind), &at);
        self.cached(key, &at, self.inner.search_nearby(at, kind)).await
    }

    async fn search_by_text(
        &self,
        at: Coordinates,
        query: &str,
    ) -> Result<PlaceSearch, ProviderError> {
        let key = self.cache.key(QueryKey::Text(query.to_string()), &at);
        self.cached(key, &at, self.inner.search_by_text(at, query)).await
    }
}
