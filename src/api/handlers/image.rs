//! SVG images referenced by the frames.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use crate::app_state::AppState;
use crate::domain::Fid;
use crate::error::{ErrorResponse, FrameError};
use crate::render::{leaderboard_card, stats_card};

const SVG: &str = "image/svg+xml";

/// Frame clients must refetch on every render.
const NO_CACHE: &str = "max-age=0";

/// `GET /image/stats/{fid}`: Stats card.
///
/// # Errors
///
/// Returns [`FrameError::InvalidFid`] if `fid` is not a decimal number.
#[utoipa::path(
    get,
    path = "/image/stats/{fid}",
    tag = "Images",
    summary = "Stats card image",
    params(("fid" = String, Path, description = "Farcaster user id")),
    responses(
        (status = 200, description = "SVG stats card", content_type = "image/svg+xml", body = String),
        (status = 400, description = "Malformed fid", body = ErrorResponse),
    )
)]
pub async fn stats_image(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<impl IntoResponse, FrameError> {
    let fid: Fid = raw.parse()?;
    let metrics = state.metrics.compute_metrics(fid).await;
    Ok((
        [(header::CONTENT_TYPE, SVG), (header::CACHE_CONTROL, NO_CACHE)],
        stats_card(&metrics),
    ))
}

/// `GET /image/leaderboard/{fid}`: Leaderboard card highlighting `fid`.
///
/// # Errors
///
/// Returns [`FrameError::InvalidFid`] if `fid` is not a decimal number.
#[utoipa::path(
    get,
    path = "/image/leaderboard/{fid}",
    tag = "Images",
    summary = "Leaderboard card image",
    params(("fid" = String, Path, description = "Farcaster user id of the viewer")),
    responses(
        (status = 200, description = "SVG leaderboard card", content_type = "image/svg+xml", body = String),
        (status = 400, description = "Malformed fid", body = ErrorResponse),
    )
)]
pub async fn leaderboard_image(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<impl IntoResponse, FrameError> {
    let fid: Fid = raw.parse()?;
    let entries = state.leaderboard.build_leaderboard(fid).await;
    Ok((
        [(header::CONTENT_TYPE, SVG), (header::CACHE_CONTROL, NO_CACHE)],
        leaderboard_card(&entries, fid),
    ))
}

/// Image routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/image/stats/{fid}", get(stats_image))
        .route("/image/leaderboard/{fid}", get(leaderboard_image))
}
