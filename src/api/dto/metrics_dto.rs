//! JSON shapes for the metrics and leaderboard API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{LeaderboardEntry, MetricsResult};

/// Response body for `GET /api/v1/metrics/{fid}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MetricsResponse {
    /// Farcaster user id.
    pub fid: u64,
    /// Markers received in replies today.
    pub earning_count: u64,
    /// Markers the user may still give today.
    pub allowance: u64,
    /// All-time marker count.
    pub all_time_count: u64,
    /// 1-based leaderboard position.
    pub rank: u64,
    /// Profile name, `"N/A"` when unknown.
    pub display_name: String,
    /// Profile picture URL.
    pub avatar_url: Option<String>,
    /// Set when no events data has been fetched yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Warpcast compose link sharing these figures.
    pub share_url: String,
}

impl MetricsResponse {
    /// Builds the response from computed metrics and their share link.
    #[must_use]
    pub fn new(metrics: MetricsResult, share_url: String) -> Self {
        Self {
            fid: metrics.fid.get(),
            earning_count: metrics.earning_count,
            allowance: metrics.allowance,
            all_time_count: metrics.all_time_count,
            rank: metrics.rank,
            display_name: metrics.display_name,
            avatar_url: metrics.avatar_url,
            error: metrics.error,
            share_url,
        }
    }
}

/// One leaderboard line.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardEntryDto {
    /// Farcaster user id.
    pub fid: u64,
    /// All-time marker count.
    pub score: u64,
    /// 1-based position.
    pub rank: u64,
    /// Profile name; empty when the directory did not know the user.
    pub display_name: String,
}

impl From<LeaderboardEntry> for LeaderboardEntryDto {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            fid: entry.fid.get(),
            score: entry.score,
            rank: entry.rank,
            display_name: entry.display_name,
        }
    }
}

/// Response body for `GET /api/v1/leaderboard/{fid}`.
///
/// `entries` holds the top entries by rank followed by the requesting
/// user's own entry, which may repeat one of them.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    /// Requesting user.
    pub fid: u64,
    /// Top entries, then the self-entry.
    pub entries: Vec<LeaderboardEntryDto>,
}
