//! Time-windowed cache over one warehouse dataset.
//!
//! [`SnapshotCache`] keeps the last successfully fetched rows of a single
//! saved query. A read older than the refresh interval triggers a refetch;
//! a failed refetch keeps the previous rows and timestamp so the next
//! request tries again.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, TimeDelta, Utc};
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, RwLock};

use crate::clock::Clock;
use crate::domain::{Dataset, Snapshot};
use crate::source::DataSource;

/// Cached rows of one dataset with single-flight refresh.
///
/// # Concurrency
///
/// - Fresh reads only take the read lock and clone the snapshot handle.
/// - Stale readers queue on a refresh gate. The first one through fetches;
///   the rest see that an attempt finished while they waited and reuse its
///   result, whether it succeeded or not. Concurrent stale reads cost one
///   upstream call, even during an outage.
/// - The snapshot is replaced wholesale, never mutated in place.
#[derive(Debug)]
pub struct SnapshotCache<T> {
    dataset: Dataset,
    query_id: u64,
    source: Arc<dyn DataSource>,
    clock: Arc<dyn Clock>,
    refresh_interval: TimeDelta,
    current: RwLock<Snapshot<T>>,
    refresh_gate: Mutex<()>,
    attempts: AtomicU64,
}

impl<T> SnapshotCache<T>
where
    T: DeserializeOwned + Send + Sync,
{
    /// Creates an empty cache for `dataset`, backed by `query_id`.
    #[must_use]
    pub fn new(
        dataset: Dataset,
        query_id: u64,
        source: Arc<dyn DataSource>,
        clock: Arc<dyn Clock>,
        refresh_interval: TimeDelta,
    ) -> Self {
        Self {
            dataset,
            query_id,
            source,
            clock,
            refresh_interval,
            current: RwLock::new(Snapshot::empty()),
            refresh_gate: Mutex::new(()),
            attempts: AtomicU64::new(0),
        }
    }

    /// Returns the current snapshot, refreshing it first if it is missing
    /// or older than the refresh interval.
    ///
    /// Never fails: when the refresh fails the previous snapshot (possibly
    /// empty) is returned.
    pub async fn get_snapshot(&self) -> Snapshot<T> {
        {
            let current = self.current.read().await;
            if !current.is_stale(self.clock.now(), self.refresh_interval) {
                tracing::debug!(dataset = %self.dataset, "using cached snapshot");
                return current.clone();
            }
        }

        let seen = self.attempts.load(Ordering::Acquire);
        let _gate = self.refresh_gate.lock().await;
        if self.attempts.load(Ordering::Acquire) != seen {
            tracing::debug!(dataset = %self.dataset, "reusing concurrent refresh attempt");
            return self.current.read().await.clone();
        }

        let now = self.clock.now();
        let still_stale = self
            .current
            .read()
            .await
            .is_stale(now, self.refresh_interval);
        if still_stale {
            self.refresh(now).await;
        }

        self.current.read().await.clone()
    }

    /// Returns the current snapshot without ever triggering a refresh.
    pub async fn peek(&self) -> Snapshot<T> {
        self.current.read().await.clone()
    }

    async fn refresh(&self, now: DateTime<Utc>) {
        tracing::info!(dataset = %self.dataset, query_id = self.query_id, "fetching fresh snapshot");

        match self.source.latest_rows(self.query_id).await {
            Ok(raw) => {
                let rows = decode_rows::<T>(self.dataset, raw);
                tracing::info!(dataset = %self.dataset, rows = rows.len(), "snapshot refreshed");
                *self.current.write().await = Snapshot::new(rows, now);
            }
            Err(err) => {
                tracing::error!(
                    dataset = %self.dataset,
                    query_id = self.query_id,
                    error = %err,
                    "snapshot refresh failed, keeping previous rows"
                );
            }
        }
        self.attempts.fetch_add(1, Ordering::Release);
    }
}

/// Decodes untyped rows, skipping anything that is not an object of the
/// expected shape.
fn decode_rows<T: DeserializeOwned>(dataset: Dataset, raw: Vec<serde_json::Value>) -> Vec<T> {
    let total = raw.len();
    let rows: Vec<T> = raw
        .into_iter()
        .filter(serde_json::Value::is_object)
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(row) => Some(row),
            Err(err) => {
                tracing::debug!(%dataset, error = %err, "skipping malformed row");
                None
            }
        })
        .collect();

    let skipped = total - rows.len();
    if skipped > 0 {
        tracing::warn!(%dataset, skipped, total, "dropped rows that did not decode");
    }
    rows
}
