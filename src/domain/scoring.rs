//! Pure aggregation over snapshot rows: earnings, allowance and ranking.
//!
//! Everything here is synchronous and side-effect free; the services feed
//! it rows taken from the snapshot caches.

use serde::Serialize;

use super::{EventRow, Fid, LeaderboardRow};

/// Glyph whose occurrences count as one unit of earning or spending.
pub const MARKER: char = '🥜';

/// Daily allowance before any spending.
pub const INITIAL_ALLOWANCE: u64 = 30;

/// Number of leaderboard entries shown ahead of the self-entry.
pub const TOP_N: usize = 9;

/// Message attached to metrics computed without any events data.
pub const DATA_ERROR: &str = "API error";

/// Per-user figures shown on the stats card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsResult {
    /// User the figures belong to.
    pub fid: Fid,
    /// Markers received in replies to this user's casts.
    pub earning_count: u64,
    /// Markers the user may still give today, in `0..=INITIAL_ALLOWANCE`.
    pub allowance: u64,
    /// Score from the leaderboard dataset, or `earning_count` when absent.
    pub all_time_count: u64,
    /// 1-based leaderboard position, or `rows + 1` when absent.
    pub rank: u64,
    /// Resolved profile name.
    pub display_name: String,
    /// Resolved avatar URL.
    pub avatar_url: Option<String>,
    /// Set when the events dataset was never fetched successfully.
    pub error: Option<String>,
}

/// One line of the rendered leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    /// User the line belongs to.
    pub fid: Fid,
    /// All-time marker count.
    pub score: u64,
    /// 1-based dense position.
    pub rank: u64,
    /// Profile name; empty when the directory did not return the user.
    pub display_name: String,
}

/// Counts marker glyphs in `text`.
#[must_use]
pub fn count_markers(text: &str) -> u64 {
    text.matches(MARKER).count() as u64
}

/// Sum of markers in replies whose parent author is `fid`.
///
/// Top-level casts (no parent) never count.
#[must_use]
pub fn earning_count(rows: &[EventRow], fid: Fid) -> u64 {
    rows.iter()
        .filter(|row| row.parent_author == Some(fid))
        .map(|row| count_markers(&row.text))
        .sum()
}

/// Sum of markers in casts authored by `fid`.
#[must_use]
pub fn used_count(rows: &[EventRow], fid: Fid) -> u64 {
    rows.iter()
        .filter(|row| row.author == fid)
        .map(|row| count_markers(&row.text))
        .sum()
}

/// Remaining allowance after spending `used` markers.
#[must_use]
pub const fn allowance(used: u64) -> u64 {
    INITIAL_ALLOWANCE.saturating_sub(used)
}

/// Orders leaderboard rows by score descending and numbers them 1..N.
///
/// The sort is stable, so equal scores keep warehouse order. Display
/// names are left empty.
#[must_use]
pub fn rank_rows(rows: &[LeaderboardRow]) -> Vec<LeaderboardEntry> {
    let mut sorted: Vec<&LeaderboardRow> = rows.iter().collect();
    sorted.sort_by(|a, b| b.score.cmp(&a.score));
    sorted
        .into_iter()
        .zip(1u64..)
        .map(|(row, rank)| LeaderboardEntry {
            fid: row.fid,
            score: row.score,
            rank,
            display_name: String::new(),
        })
        .collect()
}

/// Rank a user absent from `ranked` falls back to.
#[must_use]
pub fn fallback_rank(ranked: &[LeaderboardEntry]) -> u64 {
    ranked.len() as u64 + 1
}
