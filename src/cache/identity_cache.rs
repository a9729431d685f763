//! Bounded memoization of resolved identities.
//!
//! [`IdentityCache`] stores one [`IdentityRecord`] per fid behind a
//! [`tokio::sync::RwLock`]. Entries optionally expire after a TTL, and
//! once the capacity is reached the oldest entry makes room for a new one.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;

use crate::clock::Clock;
use crate::domain::{Fid, IdentityRecord};

#[derive(Debug, Clone)]
struct CachedIdentity {
    record: IdentityRecord,
    stored_at: DateTime<Utc>,
}

/// Process-local identity memo with capacity and TTL policy.
///
/// Only successful directory answers are stored; callers never insert
/// placeholders produced by a failed lookup.
#[derive(Debug)]
pub struct IdentityCache {
    entries: RwLock<HashMap<Fid, CachedIdentity>>,
    capacity: usize,
    ttl: Option<TimeDelta>,
    clock: Arc<dyn Clock>,
}

impl IdentityCache {
    /// Creates an empty cache holding at most `capacity` records.
    ///
    /// `ttl = None` keeps records for the lifetime of the process.
    #[must_use]
    pub fn new(capacity: usize, ttl: Option<TimeDelta>, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity,
            ttl,
            clock,
        }
    }

    /// Returns the memoized record for `fid`, if present and not expired.
    pub async fn lookup(&self, fid: Fid) -> Option<IdentityRecord> {
        let now = self.clock.now();
        let map = self.entries.read().await;
        map.get(&fid)
            .filter(|cached| !self.is_expired(cached, now))
            .map(|cached| cached.record.clone())
    }

    /// Stores `record`, replacing any previous entry for the same fid.
    ///
    /// When full, expired entries are purged first; if that frees nothing
    /// the oldest entry is evicted.
    pub async fn insert(&self, record: IdentityRecord) {
        if self.capacity == 0 {
            return;
        }
        let now = self.clock.now();
        let mut map = self.entries.write().await;

        if !map.contains_key(&record.fid) && map.len() >= self.capacity {
            map.retain(|_, cached| !self.is_expired(cached, now));
            if map.len() >= self.capacity {
                let oldest = map
                    .iter()
                    .min_by_key(|(_, cached)| cached.stored_at)
                    .map(|(fid, _)| *fid);
                if let Some(oldest) = oldest {
                    map.remove(&oldest);
                    tracing::debug!(fid = %oldest, "evicted oldest identity");
                }
            }
        }

        map.insert(
            record.fid,
            CachedIdentity {
                record,
                stored_at: now,
            },
        );
    }

    /// Returns the number of stored records, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns `true` if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn is_expired(&self, cached: &CachedIdentity, now: DateTime<Utc>) -> bool {
        self.ttl.is_some_and(|ttl| now - cached.stored_at > ttl)
    }
}
