//! Resolver configuration.

use std::time::Duration;

/// How category searches are sent to the places provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// One independent search per category, text search first where the
    /// category has a disambiguating query.
    #[default]
    PerCategory,
    /// A single multi-category call that completes every category at once.
    Batched,
}

/// Configuration parameters for one resolver run.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Quiet period after the latest category completion before the
    /// search counts as settled (milliseconds).
    pub settle_debounce_ms: u64,

    /// Hard ceiling on the category phase (milliseconds).
    pub ceiling_ms: u64,

    /// Timeout for the batched travel-time lookup (milliseconds).
    pub travel_time_timeout_ms: u64,

    /// Maximum number of amenities returned.
    pub max_results: usize,

    /// Amenities farther than this straight-line distance are dropped
    /// before travel times are requested.
    pub max_distance_km: f64,

    /// Routed walking times above this are discarded (minutes).
    pub max_walk_mins: u32,

    /// Routed driving times above this are discarded (minutes).
    pub max_drive_mins: u32,

    /// Estimated walking times above this are discarded (minutes).
    pub max_estimated_walk_mins: u32,

    /// Number of nearest candidates considered when ranking by quality.
    pub rank_window: usize,

    pub dispatch: DispatchMode,
}

impl ResolverConfig {
    /// Returns the settle debounce as a Duration.
    pub fn settle_debounce(&self) -> Duration {
        Duration::from_millis(self.settle_debounce_ms)
    }

    /// Returns the ceiling as a Duration.
    pub fn ceiling(&self) -> Duration {
        Duration::from_millis(self.ceiling_ms)
    }

    /// Returns the travel-time timeout as a Duration.
    pub fn travel_time_timeout(&self) -> Duration {
        Duration::from_millis(self.travel_time_timeout_ms)
    }

    /// Switch the dispatch mode.
    pub fn with_dispatch(mut self, dispatch: DispatchMode) -> Self {
        self.dispatch = dispatch;
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            settle_debounce_ms: 300,
            ceiling_ms: 15_000,
            travel_time_timeout_ms: 5_000,
            max_results: 5,
            max_distance_km: 2.0,
            max_walk_mins: 30,
            max_drive_mins: 20,
            max_estimated_walk_mins: 90,
            rank_window: 15,
            dispatch: DispatchMode::PerCategory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ResolverConfig::default();

        assert_eq!(config.settle_debounce_ms, 300);
        assert_eq!(config.ceiling_ms, 15_000);
        assert_eq!(config.travel_time_timeout_ms, 5_000);
        assert_eq!(config.max_results, 5);
        assert_eq!(config.max_distance_km, 2.0);
        assert_eq!(config.max_walk_mins, 30);
        assert_eq!(config.max_drive_mins, 20);
        assert_eq!(config.max_estimated_walk_mins, 90);
        assert_eq!(config.rank_window, 15);
        assert_eq!(config.dispatch, DispatchMode::PerCategory);
    }

    #[test]
    fn duration_methods() {
        let config = ResolverConfig::default();

        assert_eq!(config.settle_debounce(), Duration::from_millis(300));
        assert_eq!(config.ceiling(), Duration::from_secs(15));
        assert_eq!(config.travel_time_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn struct_update() {
        let config = ResolverConfig {
            ceiling_ms: 2_000,
            max_results: 3,
            ..ResolverConfig::default()
        }
        .with_dispatch(DispatchMode::Batched);

        assert_eq!(config.ceiling(), Duration::from_secs(2));
        assert_eq!(config.max_results, 3);
        assert_eq!(config.dispatch, DispatchMode::Batched);
        assert_eq!(config.settle_debounce_ms, 300);
    }
}
