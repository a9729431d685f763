//! Warehouse row shapes for the two cached datasets.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Fid;

/// Logical dataset backed by one saved warehouse query.
///
/// The events and leaderboard views are cached independently and are not
/// guaranteed to agree with each other at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// Raw casts: one row per posted message.
    Events,
    /// Pre-aggregated all-time counts per user.
    Leaderboard,
}

impl Dataset {
    /// Returns the lowercase name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::Leaderboard => "leaderboard",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One posted message from the events dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRow {
    /// Message body; marker glyphs inside it are counted.
    pub text: String,
    /// Author of the message.
    #[serde(rename = "fid")]
    pub author: Fid,
    /// Author of the message being replied to, if any.
    #[serde(rename = "parent_fid", default)]
    pub parent_author: Option<Fid>,
    /// Warehouse timestamp, carried through untouched.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// One row of the leaderboard dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    /// User the score belongs to.
    pub fid: Fid,
    /// All-time marker count.
    #[serde(rename = "peanut_count")]
    pub score: u64,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_row_decodes_warehouse_names() {
        let raw = json!({"text": "🥜", "fid": 5, "parent_fid": "7", "timestamp": "2024-12-01"});
        let Ok(row) = serde_json::from_value::<EventRow>(raw) else {
            panic!("row should decode");
        };
        assert_eq!(row.author, Fid::new(5));
        assert_eq!(row.parent_author, Some(Fid::new(7)));
        assert_eq!(row.timestamp.as_deref(), Some("2024-12-01"));
    }

    #[test]
    fn event_row_allows_null_or_missing_parent() {
        let null_parent = serde_json::from_value::<EventRow>(
            json!({"text": "hi", "fid": 1, "parent_fid": null}),
        );
        let missing_parent = serde_json::from_value::<EventRow>(json!({"text": "hi", "fid": 1}));
        let (Ok(a), Ok(b)) = (null_parent, missing_parent) else {
            panic!("rows should decode");
        };
        assert_eq!(a.parent_author, None);
        assert_eq!(b.parent_author, None);
    }

    #[test]
    fn leaderboard_row_accepts_string_fid() {
        let Ok(row) =
            serde_json::from_value::<LeaderboardRow>(json!({"fid": "12", "peanut_count": 40}))
        else {
            panic!("row should decode");
        };
        assert_eq!(row.fid, Fid::new(12));
        assert_eq!(row.score, 40);
    }

    #[test]
    fn dataset_names() {
        assert_eq!(Dataset::Events.to_string(), "events");
        assert_eq!(Dataset::Leaderboard.as_str(), "leaderboard");
    }
}
