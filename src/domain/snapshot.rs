//! Point-in-time copy of a warehouse dataset.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

/// Immutable rows of one dataset plus the instant they were fetched.
///
/// `fetched_at` is `None` until the first successful fetch; such a
/// snapshot always has empty rows. Cloning shares the row buffer.
#[derive(Debug)]
pub struct Snapshot<T> {
    rows: Arc<[T]>,
    fetched_at: Option<DateTime<Utc>>,
}

impl<T> Snapshot<T> {
    /// Snapshot that was never populated.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rows: Arc::from(Vec::<T>::new()),
            fetched_at: None,
        }
    }

    /// Snapshot holding `rows` fetched at `fetched_at`.
    #[must_use]
    pub fn new(rows: Vec<T>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            rows: Arc::from(rows),
            fetched_at: Some(fetched_at),
        }
    }

    /// Rows of the snapshot, in warehouse order.
    #[must_use]
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Instant of the last successful fetch.
    #[must_use]
    pub const fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// Returns `true` once a fetch has succeeded in this process.
    #[must_use]
    pub const fn is_populated(&self) -> bool {
        self.fetched_at.is_some()
    }

    /// Returns `true` if the snapshot was never populated or is older
    /// than `max_age` at `now`.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: TimeDelta) -> bool {
        match self.fetched_at {
            None => true,
            Some(fetched_at) => now - fetched_at > max_age,
        }
    }
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
            fetched_at: self.fetched_at,
        }
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_is_stale_and_unpopulated() {
        let snapshot: Snapshot<u8> = Snapshot::empty();
        assert!(!snapshot.is_populated());
        assert!(snapshot.rows().is_empty());
        assert!(snapshot.is_stale(Utc::now(), TimeDelta::minutes(5)));
    }

    #[test]
    fn staleness_is_strictly_greater_than_max_age() {
        let fetched = Utc::now();
        let snapshot = Snapshot::new(vec![1u8, 2], fetched);
        let max_age = TimeDelta::minutes(5);

        assert!(!snapshot.is_stale(fetched, max_age));
        assert!(!snapshot.is_stale(fetched + max_age, max_age));
        assert!(snapshot.is_stale(fetched + max_age + TimeDelta::milliseconds(1), max_age));
    }

    #[test]
    fn clone_shares_rows() {
        let snapshot = Snapshot::new(vec![1u8, 2, 3], Utc::now());
        let copy = snapshot.clone();
        assert_eq!(copy.rows(), &[1, 2, 3]);
        assert_eq!(copy.fetched_at(), snapshot.fetched_at());
    }
}
