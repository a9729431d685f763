//! Metrics aggregator: earnings, allowance, all-time count and rank.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::cache::SnapshotCache;
use crate::domain::scoring::{
    DATA_ERROR, allowance, earning_count, fallback_rank, rank_rows, used_count,
};
use crate::domain::{EventRow, Fid, LeaderboardRow, MetricsResult};
use crate::service::IdentityService;

/// Computes the stats card figures for one user.
///
/// Earnings and allowance come from the events snapshot; all-time count
/// and rank come from the separately cached leaderboard snapshot. The two
/// may disagree while one of them is fresher than the other.
#[derive(Debug)]
pub struct MetricsService {
    events: Arc<SnapshotCache<EventRow>>,
    leaderboard: Arc<SnapshotCache<LeaderboardRow>>,
    identities: Arc<IdentityService>,
}

impl MetricsService {
    /// Creates a new `MetricsService`.
    #[must_use]
    pub fn new(
        events: Arc<SnapshotCache<EventRow>>,
        leaderboard: Arc<SnapshotCache<LeaderboardRow>>,
        identities: Arc<IdentityService>,
    ) -> Self {
        Self {
            events,
            leaderboard,
            identities,
        }
    }

    /// Markers received by `fid`, from the events snapshot.
    pub async fn earning_count(&self, fid: Fid) -> u64 {
        let events = self.events.get_snapshot().await;
        earning_count(events.rows(), fid)
    }

    /// Fetch times of the events and leaderboard snapshots, without
    /// refreshing either.
    pub async fn fetched_at(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        let (events, board) = tokio::join!(self.events.peek(), self.leaderboard.peek());
        (events.fetched_at(), board.fetched_at())
    }

    /// Computes every figure on the stats card.
    ///
    /// Never fails. Missing data degrades to zeros and placeholders, and
    /// `error` is set only if the events dataset was never fetched.
    pub async fn compute_metrics(&self, fid: Fid) -> MetricsResult {
        let (events, board) = tokio::join!(
            self.events.get_snapshot(),
            self.leaderboard.get_snapshot()
        );

        let earning_count = earning_count(events.rows(), fid);
        let allowance = allowance(used_count(events.rows(), fid));

        let ranked = rank_rows(board.rows());
        let own = ranked.iter().find(|entry| entry.fid == fid);
        let all_time_count = own.map_or(earning_count, |entry| entry.score);
        let rank = own.map_or_else(|| fallback_rank(&ranked), |entry| entry.rank);

        let identity = self.identities.resolve(fid).await;
        let error = (!events.is_populated()).then(|| DATA_ERROR.to_string());

        tracing::info!(
            %fid,
            earning_count,
            allowance,
            all_time_count,
            rank,
            has_error = error.is_some(),
            "metrics computed"
        );

        MetricsResult {
            fid,
            earning_count,
            allowance,
            all_time_count,
            rank,
            display_name: identity.display_name,
            avatar_url: identity.avatar_url,
            error,
        }
    }
}
