//! Frame screens: the stats card and the leaderboard.
//!
//! Both screens answer `GET` (first render in a client) and `POST` (button
//! presses). Frame requests never fail: a bad or missing fid falls back to
//! the configured default user.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;

use crate::api::dto::{FrameActionPayload, LeaderboardQuery};
use crate::app_state::AppState;
use crate::domain::Fid;
use crate::render::{FrameButton, FrameDocument};
use crate::share::share_url;

const TITLE: &str = "Peanut";

/// `GET /`: Stats frame for the default user.
pub async fn stats_frame(State(state): State<AppState>) -> Html<String> {
    let fid = state.config.default_fid;
    Html(render_stats(&state, fid, false).await)
}

/// `POST /`: Stats frame after a button press.
///
/// The user is the fid typed into the input, else the packet's fid, else
/// the default user.
pub async fn stats_frame_action(State(state): State<AppState>, body: Bytes) -> Html<String> {
    let payload = FrameActionPayload::from_body(&body);
    let fid = payload
        .input_text()
        .and_then(parse_fid)
        .or_else(|| payload.fid())
        .unwrap_or(state.config.default_fid);
    Html(render_stats(&state, fid, true).await)
}

/// `POST /reset`: Back to the initial stats frame, as served by `GET /`.
pub async fn stats_frame_reset(State(state): State<AppState>) -> Html<String> {
    let fid = state.config.default_fid;
    Html(render_stats(&state, fid, false).await)
}

/// `GET /leaderboard`: Leaderboard frame.
pub async fn leaderboard_frame(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Html<String> {
    let fid = query
        .fid
        .as_deref()
        .and_then(parse_fid)
        .unwrap_or(state.config.default_fid);
    Html(render_leaderboard(&state, fid))
}

/// `POST /leaderboard`: Leaderboard frame after the stats frame's button.
///
/// The fid carried in the button target wins over the packet's fid.
pub async fn leaderboard_frame_action(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
    body: Bytes,
) -> Html<String> {
    let payload = FrameActionPayload::from_body(&body);
    let fid = query
        .fid
        .as_deref()
        .and_then(parse_fid)
        .or_else(|| payload.fid())
        .unwrap_or(state.config.default_fid);
    Html(render_leaderboard(&state, fid))
}

async fn render_stats(state: &AppState, fid: Fid, responded: bool) -> String {
    let base = base_url(state);
    let metrics = state.metrics.compute_metrics(fid).await;
    let share = share_url(&metrics, base, state.clock.now());
    tracing::debug!(%fid, earning = metrics.earning_count, "rendering stats frame");

    let mut doc = FrameDocument::new(TITLE, format!("{base}/image/stats/{fid}"), format!("{base}/"))
        .with_input("Enter Farcaster FID...")
        .with_button(FrameButton::post("Check", format!("{base}/")))
        .with_button(FrameButton::post(
            "Leaderboard",
            format!("{base}/leaderboard?fid={fid}"),
        ))
        .with_button(FrameButton::link("📤 Share", share));
    if responded {
        doc = doc.with_button(FrameButton::post("Reset", format!("{base}/reset")));
    }
    doc.render()
}

fn render_leaderboard(state: &AppState, fid: Fid) -> String {
    let base = base_url(state);
    FrameDocument::new(
        format!("{TITLE} Leaderboard"),
        format!("{base}/image/leaderboard/{fid}"),
        format!("{base}/"),
    )
    .with_button(FrameButton::post("Back", format!("{base}/")))
    .render()
}

fn base_url(state: &AppState) -> &str {
    state.config.public_base_url.trim_end_matches('/')
}

fn parse_fid(raw: &str) -> Option<Fid> {
    raw.parse()
        .inspect_err(|e| tracing::warn!(error = %e, "ignoring unparsable fid"))
        .ok()
}

/// Frame routes mounted at the root.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(stats_frame).post(stats_frame_action))
        .route("/reset", post(stats_frame_reset))
        .route(
            "/leaderboard",
            get(leaderboard_frame).post(leaderboard_frame_action),
        )
}
