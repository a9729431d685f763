//! External collaborators: the data warehouse and the identity directory.
//!
//! Both are reached through object-safe traits so the caches and services
//! can be exercised against in-memory fakes. [`DuneClient`] and
//! [`AirstackClient`] are the production implementations over `reqwest`.

pub mod airstack;
pub mod dune;

use std::fmt;

use async_trait::async_trait;

use crate::domain::{Fid, IdentityRecord};
use crate::error::FrameError;

pub use airstack::AirstackClient;
pub use dune::DuneClient;

/// Warehouse holding the result sets of saved queries.
#[async_trait]
pub trait DataSource: Send + Sync + fmt::Debug {
    /// Returns the rows of the latest result of `query_id`, untyped.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::DataSource`] when the call fails or the body
    /// cannot be read.
    async fn latest_rows(&self, query_id: u64) -> Result<Vec<serde_json::Value>, FrameError>;
}

/// Social-graph directory mapping user ids to profiles.
#[async_trait]
pub trait IdentityDirectory: Send + Sync + fmt::Debug {
    /// Looks up every fid in one batched call.
    ///
    /// Unknown fids are simply absent from the result.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::IdentityDirectory`] when the call fails or the
    /// body cannot be read.
    async fn lookup(&self, fids: &[Fid]) -> Result<Vec<IdentityRecord>, FrameError>;
}
