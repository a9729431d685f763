//! HTTP handlers organized by surface.

pub mod frame;
pub mod image;
pub mod metrics;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes the JSON API routes mounted under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new().merge(metrics::routes())
}
