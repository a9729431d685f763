//! In-memory fakes for the external collaborators, shared by unit tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;

use crate::app_state::AppState;
use crate::clock::Clock;
use crate::config::FrameConfig;
use crate::domain::{Fid, IdentityRecord};
use crate::error::FrameError;
use crate::service::{LeaderboardService, MetricsService};
use crate::source::{DataSource, IdentityDirectory};

/// Clock that only moves when told to. Millisecond resolution.
#[derive(Debug)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            millis: AtomicI64::new(start.timestamp_millis()),
        }
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        self.millis
            .fetch_add(delta.num_milliseconds(), Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.millis.load(Ordering::SeqCst)).unwrap_or_default()
    }
}

/// Warehouse fake answering per query id; unknown ids fail.
#[derive(Debug, Default)]
pub struct FakeDataSource {
    results: Mutex<HashMap<u64, Result<Vec<serde_json::Value>, String>>>,
    calls: AtomicUsize,
}

impl FakeDataSource {
    pub async fn set_rows(&self, query_id: u64, rows: Vec<serde_json::Value>) {
        self.results.lock().await.insert(query_id, Ok(rows));
    }

    pub async fn set_failure(&self, query_id: u64, message: &str) {
        self.results
            .lock()
            .await
            .insert(query_id, Err(message.to_string()));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for FakeDataSource {
    async fn latest_rows(&self, query_id: u64) -> Result<Vec<serde_json::Value>, FrameError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Let concurrent callers interleave the way a network call would.
        tokio::task::yield_now().await;
        match self.results.lock().await.get(&query_id) {
            Some(Ok(rows)) => Ok(rows.clone()),
            Some(Err(message)) => Err(FrameError::DataSource(message.clone())),
            None => Err(FrameError::DataSource(format!("unknown query {query_id}"))),
        }
    }
}

/// Directory fake serving a fixed set of profiles.
#[derive(Debug, Default)]
pub struct FakeDirectory {
    profiles: Mutex<HashMap<Fid, IdentityRecord>>,
    failing: Mutex<bool>,
    requests: Mutex<Vec<Vec<Fid>>>,
}

impl FakeDirectory {
    pub async fn add(&self, fid: u64, name: &str, avatar: Option<&str>) {
        let fid = Fid::new(fid);
        self.profiles.lock().await.insert(
            fid,
            IdentityRecord::new(fid, Some(name.to_string()), avatar.map(str::to_string)),
        );
    }

    pub async fn set_failing(&self, failing: bool) {
        *self.failing.lock().await = failing;
    }

    /// Fid batches received so far, in call order.
    pub async fn requests(&self) -> Vec<Vec<Fid>> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl IdentityDirectory for FakeDirectory {
    async fn lookup(&self, fids: &[Fid]) -> Result<Vec<IdentityRecord>, FrameError> {
        self.requests.lock().await.push(fids.to_vec());
        if *self.failing.lock().await {
            return Err(FrameError::IdentityDirectory("directory down".to_string()));
        }
        let profiles = self.profiles.lock().await;
        Ok(fids.iter().filter_map(|fid| profiles.get(fid).cloned()).collect())
    }
}

pub const EVENTS_QUERY: u64 = crate::config::DEFAULT_EVENTS_QUERY_ID;
pub const LEADERBOARD_QUERY: u64 = crate::config::DEFAULT_LEADERBOARD_QUERY_ID;

/// Fully wired application state over fakes and a frozen clock.
#[derive(Debug)]
pub struct Fixture {
    pub source: Arc<FakeDataSource>,
    pub directory: Arc<FakeDirectory>,
    pub clock: Arc<ManualClock>,
    pub state: AppState,
    pub metrics: Arc<MetricsService>,
    pub leaderboard: Arc<LeaderboardService>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(FrameConfig::default())
    }

    pub fn with_config(config: FrameConfig) -> Self {
        let source = Arc::new(FakeDataSource::default());
        let directory = Arc::new(FakeDirectory::default());
        let clock = Arc::new(ManualClock::default());
        let state = AppState::new(
            config,
            Arc::clone(&source) as Arc<dyn DataSource>,
            Arc::clone(&directory) as Arc<dyn IdentityDirectory>,
            Arc::clone(&clock) as Arc<dyn Clock>,
        );
        let metrics = Arc::clone(&state.metrics);
        let leaderboard = Arc::clone(&state.leaderboard);
        Self {
            source,
            directory,
            clock,
            state,
            metrics,
            leaderboard,
        }
    }
}
