//! # peanut-frame
//!
//! Farcaster frame server reporting peanut (🥜) tipping stats.
//!
//! Users tip each other by replying with the 🥜 glyph. The frame shows how
//! many peanuts a user earned today, how much of the daily allowance is
//! left, their all-time count and their rank, plus a leaderboard. Raw data
//! comes from two saved Dune queries; names and avatars come from Airstack.
//!
//! ## Architecture
//!
//! ```text
//! Farcaster clients (frame GET/POST), JSON API clients
//!     │
//!     ├── Frame / image / JSON handlers (api/)
//!     ├── SVG and frame HTML rendering (render/), share link (share)
//!     │
//!     ├── MetricsService, LeaderboardService (service/)
//!     ├── IdentityService ── IdentityCache (cache/)
//!     │
//!     ├── SnapshotCache × 2: events, leaderboard (cache/)
//!     │
//!     └── DuneClient, AirstackClient (source/)
//! ```
//!
//! Upstream failures never fail a frame: snapshots keep their last good
//! rows and identities degrade to placeholders.

pub mod api;
pub mod app_state;
pub mod cache;
pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod render;
pub mod service;
pub mod share;
pub mod source;

#[cfg(test)]
mod testing;
