//! Frame server configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Every key has a default so the server
//! starts without any configuration, although the upstream API keys are
//! needed for real data.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chrono::TimeDelta;

use crate::domain::Fid;

/// Saved Dune query returning raw casts.
pub const DEFAULT_EVENTS_QUERY_ID: u64 = 4_801_893;

/// Saved Dune query returning all-time counts per user.
pub const DEFAULT_LEADERBOARD_QUERY_ID: u64 = 4_801_919;

/// User shown when a request carries no fid.
pub const DEFAULT_FID: u64 = 443_855;

/// Top-level frame server configuration.
///
/// Loaded once at startup via [`FrameConfig::from_env`].
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Public origin of this server, used in image URLs and share links.
    pub public_base_url: String,

    /// Fid used when a request identifies no user.
    pub default_fid: Fid,

    /// Root of the Dune API.
    pub dune_api_url: String,

    /// Dune API key.
    pub dune_api_key: String,

    /// Saved query backing the events dataset.
    pub events_query_id: u64,

    /// Saved query backing the leaderboard dataset.
    pub leaderboard_query_id: u64,

    /// Airstack GraphQL endpoint.
    pub airstack_api_url: String,

    /// Airstack API key.
    pub airstack_api_key: String,

    /// Seconds a dataset snapshot stays fresh.
    pub refresh_interval_secs: u64,

    /// Maximum number of memoized identities.
    pub identity_cache_capacity: usize,

    /// Seconds a memoized identity stays valid (0 = forever).
    pub identity_cache_ttl_secs: u64,

    /// Deadline for outbound HTTP calls in seconds (0 = none).
    pub upstream_timeout_secs: u64,

    /// Deadline for handling an inbound request in seconds (0 = none).
    pub request_timeout_secs: u64,

    /// Directory served for paths no route matches.
    pub static_dir: PathBuf,

    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            public_base_url: "http://localhost:3000".to_string(),
            default_fid: Fid::new(DEFAULT_FID),
            dune_api_url: "https://api.dune.com".to_string(),
            dune_api_key: String::new(),
            events_query_id: DEFAULT_EVENTS_QUERY_ID,
            leaderboard_query_id: DEFAULT_LEADERBOARD_QUERY_ID,
            airstack_api_url: "https://api.airstack.xyz/gql".to_string(),
            airstack_api_key: String::new(),
            refresh_interval_secs: 300,
            identity_cache_capacity: 10_000,
            identity_cache_ttl_secs: 0,
            upstream_timeout_secs: 0,
            request_timeout_secs: 0,
            static_dir: PathBuf::from("./public"),
            log_json: false,
        }
    }
}

impl FrameConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to [`FrameConfig::default`] for any variable that is not
    /// set. Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` or `DEFAULT_FID` is set but cannot
    /// be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("LISTEN_ADDR") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("LISTEN_ADDR is not a socket address: {raw}"))?,
            Err(_) => defaults.listen_addr,
        };

        let default_fid = match std::env::var("DEFAULT_FID") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("DEFAULT_FID is not a fid: {raw}"))?,
            Err(_) => defaults.default_fid,
        };

        Ok(Self {
            listen_addr,
            public_base_url: env_string("PUBLIC_BASE_URL", defaults.public_base_url),
            default_fid,
            dune_api_url: env_string("DUNE_API_URL", defaults.dune_api_url),
            dune_api_key: env_string("DUNE_API_KEY", defaults.dune_api_key),
            events_query_id: parse_env("EVENTS_QUERY_ID", defaults.events_query_id),
            leaderboard_query_id: parse_env("LEADERBOARD_QUERY_ID", defaults.leaderboard_query_id),
            airstack_api_url: env_string("AIRSTACK_API_URL", defaults.airstack_api_url),
            airstack_api_key: env_string("AIRSTACK_API_KEY", defaults.airstack_api_key),
            refresh_interval_secs: parse_env("REFRESH_INTERVAL_SECS", defaults.refresh_interval_secs),
            identity_cache_capacity: parse_env(
                "IDENTITY_CACHE_CAPACITY",
                defaults.identity_cache_capacity,
            ),
            identity_cache_ttl_secs: parse_env(
                "IDENTITY_CACHE_TTL_SECS",
                defaults.identity_cache_ttl_secs,
            ),
            upstream_timeout_secs: parse_env("UPSTREAM_TIMEOUT_SECS", defaults.upstream_timeout_secs),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
            static_dir: std::env::var("STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
            log_json: parse_env_bool("LOG_JSON", defaults.log_json),
        })
    }

    /// Snapshot freshness window.
    #[must_use]
    pub fn refresh_interval(&self) -> TimeDelta {
        secs_delta(self.refresh_interval_secs)
    }

    /// Identity TTL, or `None` when identities never expire.
    #[must_use]
    pub fn identity_ttl(&self) -> Option<TimeDelta> {
        (self.identity_cache_ttl_secs > 0).then(|| secs_delta(self.identity_cache_ttl_secs))
    }

    /// Outbound call deadline, or `None` to wait indefinitely.
    #[must_use]
    pub fn upstream_timeout(&self) -> Option<Duration> {
        non_zero_secs(self.upstream_timeout_secs)
    }

    /// Inbound request deadline, or `None` to wait indefinitely.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        non_zero_secs(self.request_timeout_secs)
    }
}

/// Converts seconds to a [`TimeDelta`], saturating at its maximum.
fn secs_delta(secs: u64) -> TimeDelta {
    i64::try_from(secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX)
}

fn non_zero_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Reads a string variable, returning `default` when unset.
fn env_string(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key)
        .ok()
        .map(|v| v.to_ascii_lowercase())
        .as_deref()
    {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}
