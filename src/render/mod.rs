//! Presentation: frame HTML documents and the SVG cards they point at.

pub mod format;
pub mod frame;
pub mod svg;

pub use frame::{FrameButton, FrameDocument};
pub use svg::{leaderboard_card, stats_card};
