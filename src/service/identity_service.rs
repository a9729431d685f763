//! Identity resolution: memoized single lookups and batched name lookups.

use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::IdentityCache;
use crate::domain::{Fid, IdentityRecord};
use crate::source::IdentityDirectory;

/// Resolves profile metadata through the [`IdentityCache`] and directory.
#[derive(Debug)]
pub struct IdentityService {
    cache: IdentityCache,
    directory: Arc<dyn IdentityDirectory>,
}

impl IdentityService {
    /// Creates a service over `cache` and `directory`.
    #[must_use]
    pub fn new(cache: IdentityCache, directory: Arc<dyn IdentityDirectory>) -> Self {
        Self { cache, directory }
    }

    /// Returns the inner [`IdentityCache`].
    #[must_use]
    pub const fn cache(&self) -> &IdentityCache {
        &self.cache
    }

    /// Resolves one user's name and avatar.
    ///
    /// A directory answer is memoized, including "no such profile", which
    /// is stored as a placeholder. A failed call yields a placeholder that
    /// is not memoized, so a later request retries.
    pub async fn resolve(&self, fid: Fid) -> IdentityRecord {
        if let Some(hit) = self.cache.lookup(fid).await {
            tracing::debug!(%fid, "identity cache hit");
            return hit;
        }

        match self.directory.lookup(&[fid]).await {
            Ok(records) => {
                let record = records
                    .into_iter()
                    .find(|record| record.fid == fid)
                    .unwrap_or_else(|| IdentityRecord::placeholder(fid));
                self.cache.insert(record.clone()).await;
                record
            }
            Err(err) => {
                tracing::error!(%fid, error = %err, "identity lookup failed");
                IdentityRecord::placeholder(fid)
            }
        }
    }

    /// Looks up display names for `fids` in one batched directory call.
    ///
    /// Bypasses the memo. Fids the directory does not return are absent
    /// from the map; a failed call yields an empty map.
    pub async fn display_names(&self, fids: &[Fid]) -> HashMap<Fid, String> {
        match self.directory.lookup(fids).await {
            Ok(records) => records
                .into_iter()
                .map(|record| (record.fid, record.display_name))
                .collect(),
            Err(err) => {
                tracing::error!(count = fids.len(), error = %err, "batched identity lookup failed");
                HashMap::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, SystemClock};
    use crate::domain::PLACEHOLDER_NAME;
    use crate::testing::FakeDirectory;

    fn service(directory: &Arc<FakeDirectory>) -> IdentityService {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        IdentityService::new(
            IdentityCache::new(100, None, clock),
            Arc::clone(directory) as Arc<dyn IdentityDirectory>,
        )
    }

    #[tokio::test]
    async fn resolve_memoizes_hits() {
        let directory = Arc::new(FakeDirectory::default());
        directory.add(7, "bob", Some("https://img/bob.png")).await;
        let service = service(&directory);

        let first = service.resolve(Fid::new(7)).await;
        let second = service.resolve(Fid::new(7)).await;

        assert_eq!(first, second);
        assert_eq!(first.display_name, "bob");
        assert_eq!(directory.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn unknown_profile_is_memoized_as_placeholder() {
        let directory = Arc::new(FakeDirectory::default());
        let service = service(&directory);

        let record = service.resolve(Fid::new(9)).await;
        assert_eq!(record.display_name, PLACEHOLDER_NAME);
        assert!(service.cache().lookup(Fid::new(9)).await.is_some());
    }

    #[tokio::test]
    async fn failures_are_not_memoized() {
        let directory = Arc::new(FakeDirectory::default());
        directory.add(7, "bob", None).await;
        directory.set_failing(true).await;
        let service = service(&directory);

        let degraded = service.resolve(Fid::new(7)).await;
        assert_eq!(degraded.display_name, PLACEHOLDER_NAME);
        assert_eq!(degraded.avatar_url, None);
        assert!(service.cache().is_empty().await);

        directory.set_failing(false).await;
        let recovered = service.resolve(Fid::new(7)).await;
        assert_eq!(recovered.display_name, "bob");
        assert_eq!(directory.requests().await.len(), 2);
    }

    #[tokio::test]
    async fn display_names_is_one_batch() {
        let directory = Arc::new(FakeDirectory::default());
        directory.add(1, "a", None).await;
        directory.add(2, "b", None).await;
        let service = service(&directory);

        let names = service
            .display_names(&[Fid::new(1), Fid::new(2), Fid::new(3)])
            .await;

        assert_eq!(names.get(&Fid::new(1)).map(String::as_str), Some("a"));
        assert_eq!(names.get(&Fid::new(2)).map(String::as_str), Some("b"));
        assert!(!names.contains_key(&Fid::new(3)));
        assert_eq!(directory.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn display_names_failure_is_empty() {
        let directory = Arc::new(FakeDirectory::default());
        directory.set_failing(true).await;
        let service = service(&directory);
        assert!(service.display_names(&[Fid::new(1)]).await.is_empty());
    }
}
