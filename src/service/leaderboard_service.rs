//! Leaderboard builder: top entries plus the requesting user's own line.

use std::collections::HashSet;
use std::sync::Arc;

use crate::cache::SnapshotCache;
use crate::domain::scoring::{TOP_N, fallback_rank, rank_rows};
use crate::domain::{Fid, LeaderboardEntry, LeaderboardRow};
use crate::service::{IdentityService, MetricsService};

/// Builds the leaderboard screen for a requesting user.
#[derive(Debug)]
pub struct LeaderboardService {
    leaderboard: Arc<SnapshotCache<LeaderboardRow>>,
    metrics: Arc<MetricsService>,
    identities: Arc<IdentityService>,
}

impl LeaderboardService {
    /// Creates a new `LeaderboardService`.
    #[must_use]
    pub fn new(
        leaderboard: Arc<SnapshotCache<LeaderboardRow>>,
        metrics: Arc<MetricsService>,
        identities: Arc<IdentityService>,
    ) -> Self {
        Self {
            leaderboard,
            metrics,
            identities,
        }
    }

    /// Returns the top [`TOP_N`] entries by rank, followed by the entry of
    /// `fid`.
    ///
    /// The self-entry is always last and is not positioned by rank: it
    /// duplicates a top entry when the user is already listed. A user absent
    /// from the dataset gets their earnings count as score and rank `N + 1`.
    /// Display names come from one batched lookup; users the directory does
    /// not return keep an empty name.
    pub async fn build_leaderboard(&self, fid: Fid) -> Vec<LeaderboardEntry> {
        let board = self.leaderboard.get_snapshot().await;
        let ranked = rank_rows(board.rows());

        let self_entry = match ranked.iter().find(|entry| entry.fid == fid) {
            Some(entry) => entry.clone(),
            None => {
                let rank = fallback_rank(&ranked);
                let score = self.metrics.earning_count(fid).await;
                tracing::debug!(%fid, score, rank, "user absent from leaderboard, synthesized entry");
                LeaderboardEntry {
                    fid,
                    score,
                    rank,
                    display_name: String::new(),
                }
            }
        };

        let mut entries: Vec<LeaderboardEntry> = ranked.into_iter().take(TOP_N).collect();
        entries.push(self_entry);

        let mut seen = HashSet::new();
        let fids: Vec<Fid> = entries
            .iter()
            .map(|entry| entry.fid)
            .filter(|fid| seen.insert(*fid))
            .collect();
        let names = self.identities.display_names(&fids).await;
        for entry in &mut entries {
            if let Some(name) = names.get(&entry.fid) {
                entry.display_name.clone_from(name);
            }
        }

        tracing::info!(%fid, entries = entries.len(), "leaderboard built");
        entries
    }
}
