//! HTTP layer: frame screens, images, the JSON API and router composition.
//!
//! The JSON API is mounted under `/api/v1`; frames, images and the health
//! check live at the root. Anything no route matches is served from the
//! static directory.

pub mod dto;
pub mod handlers;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI description of the JSON and image endpoints.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "peanut-frame", description = "Peanut tipping stats for Farcaster frames"),
    paths(
        handlers::metrics::get_metrics,
        handlers::metrics::get_leaderboard,
        handlers::image::stats_image,
        handlers::image::leaderboard_image,
        handlers::system::health_handler,
    ),
    tags(
        (name = "Metrics", description = "User metrics and leaderboard as JSON"),
        (name = "Images", description = "SVG cards shown by the frames"),
        (name = "System", description = "Health"),
    )
)]
pub struct ApiDoc;

/// Builds the router with every endpoint, without middleware or state.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::frame::routes())
        .merge(handlers::image::routes())
        .merge(handlers::system::routes())
}

/// Builds the complete application: routes, Swagger UI, static files and
/// the middleware stack.
pub fn build_app(state: AppState) -> Router {
    let router = build_router();

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
    #[cfg(not(feature = "swagger-ui"))]
    let router = router.route(
        "/api-docs/openapi.json",
        axum::routing::get(|| async { axum::Json(ApiDoc::openapi()) }),
    );

    let router = router
        .fallback_service(ServeDir::new(&state.config.static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let router = match state.config.request_timeout() {
        Some(timeout) => router.layer(TimeoutLayer::new(timeout)),
        None => router,
    };

    router.with_state(state)
}
