//! Domain layer: identifiers, warehouse rows, snapshots and scoring.
//!
//! This module contains the server-side model shared by the caches and
//! services: the [`Fid`] newtype, the row shapes of both datasets, the
//! immutable [`Snapshot`] wrapper and the pure aggregation functions.

pub mod fid;
pub mod identity;
pub mod rows;
pub mod scoring;
pub mod snapshot;

pub use fid::{Fid, FidParseError};
pub use identity::{IdentityRecord, PLACEHOLDER_NAME};
pub use rows::{Dataset, EventRow, LeaderboardRow};
pub use scoring::{LeaderboardEntry, MetricsResult};
pub use snapshot::Snapshot;
