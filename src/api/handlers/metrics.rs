//! JSON API over the metrics and leaderboard services.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{LeaderboardResponse, MetricsResponse};
use crate::app_state::AppState;
use crate::domain::Fid;
use crate::error::{ErrorResponse, FrameError};
use crate::share::share_url;

/// `GET /metrics/{fid}`: Stats card figures as JSON.
///
/// # Errors
///
/// Returns [`FrameError::InvalidFid`] if `fid` is not a decimal number.
#[utoipa::path(
    get,
    path = "/api/v1/metrics/{fid}",
    tag = "Metrics",
    summary = "User metrics",
    description = "Today's earnings, remaining allowance, all-time count and rank for a user. Upstream failures degrade to placeholder values; `error` is set while no events data has been fetched.",
    params(("fid" = String, Path, description = "Farcaster user id")),
    responses(
        (status = 200, description = "Computed metrics", body = MetricsResponse),
        (status = 400, description = "Malformed fid", body = ErrorResponse),
    )
)]
pub async fn get_metrics(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<impl IntoResponse, FrameError> {
    let fid: Fid = raw.parse()?;
    let metrics = state.metrics.compute_metrics(fid).await;
    let share = share_url(&metrics, &state.config.public_base_url, state.clock.now());
    Ok(Json(MetricsResponse::new(metrics, share)))
}

/// `GET /leaderboard/{fid}`: Leaderboard as seen by `fid`.
///
/// # Errors
///
/// Returns [`FrameError::InvalidFid`] if `fid` is not a decimal number.
#[utoipa::path(
    get,
    path = "/api/v1/leaderboard/{fid}",
    tag = "Metrics",
    summary = "Leaderboard",
    description = "Top entries by all-time count followed by the requesting user's own entry.",
    params(("fid" = String, Path, description = "Farcaster user id of the viewer")),
    responses(
        (status = 200, description = "Leaderboard", body = LeaderboardResponse),
        (status = 400, description = "Malformed fid", body = ErrorResponse),
    )
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<impl IntoResponse, FrameError> {
    let fid: Fid = raw.parse()?;
    let entries = state.leaderboard.build_leaderboard(fid).await;
    Ok(Json(LeaderboardResponse {
        fid: fid.get(),
        entries: entries.into_iter().map(Into::into).collect(),
    }))
}

/// Routes mounted under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/metrics/{fid}", get(get_metrics))
        .route("/leaderboard/{fid}", get(get_leaderboard))
}
