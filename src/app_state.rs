//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::cache::{IdentityCache, SnapshotCache};
use crate::clock::Clock;
use crate::config::FrameConfig;
use crate::domain::Dataset;
use crate::service::{IdentityService, LeaderboardService, MetricsService};
use crate::source::{DataSource, IdentityDirectory};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Stats card figures.
    pub metrics: Arc<MetricsService>,
    /// Leaderboard screen.
    pub leaderboard: Arc<LeaderboardService>,
    /// Loaded configuration.
    pub config: Arc<FrameConfig>,
    /// Time source shared with the caches; stamps share links.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Wires the caches and services over the given collaborators.
    ///
    /// Each dataset gets its own [`SnapshotCache`]; the leaderboard cache
    /// is shared between the metrics and leaderboard services.
    #[must_use]
    pub fn new(
        config: FrameConfig,
        source: Arc<dyn DataSource>,
        directory: Arc<dyn IdentityDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let events = Arc::new(SnapshotCache::new(
            Dataset::Events,
            config.events_query_id,
            Arc::clone(&source),
            Arc::clone(&clock),
            config.refresh_interval(),
        ));
        let board = Arc::new(SnapshotCache::new(
            Dataset::Leaderboard,
            config.leaderboard_query_id,
            source,
            Arc::clone(&clock),
            config.refresh_interval(),
        ));

        let identities = Arc::new(IdentityService::new(
            IdentityCache::new(
                config.identity_cache_capacity,
                config.identity_ttl(),
                Arc::clone(&clock),
            ),
            directory,
        ));

        let metrics = Arc::new(MetricsService::new(
            events,
            Arc::clone(&board),
            Arc::clone(&identities),
        ));
        let leaderboard = Arc::new(LeaderboardService::new(
            board,
            Arc::clone(&metrics),
            identities,
        ));

        Self {
            metrics,
            leaderboard,
            config: Arc::new(config),
            clock,
        }
    }
}
