//! Service layer: metrics and leaderboard orchestration.
//!
//! [`MetricsService`] and [`LeaderboardService`] read the snapshot caches
//! and enrich results through [`IdentityService`]. None of them fail: every
//! upstream problem is logged and degraded to placeholder values.

pub mod identity_service;
pub mod leaderboard_service;
pub mod metrics_service;

pub use identity_service::IdentityService;
pub use leaderboard_service::LeaderboardService;
pub use metrics_service::MetricsService;
