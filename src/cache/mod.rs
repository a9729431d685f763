//! Process-local caches injected into the services.
//!
//! One [`SnapshotCache`] per warehouse dataset and a single
//! [`IdentityCache`] for profile lookups. Nothing here survives a restart.

pub mod identity_cache;
pub mod snapshot_cache;

pub use identity_cache::IdentityCache;
pub use snapshot_cache::SnapshotCache;
