//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::health::health;
use crate::handlers::ideas::create_multiple_videos;
use crate::handlers::storyboard::{generate_from_script, generate_storyboard};
use crate::middleware::cors_layer;
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/generate-storyboard", post(generate_storyboard))
        .route("/generate-from-script", post(generate_from_script))
        .route("/create-multiple-videos", post(create_multiple_videos))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        // Raise axum's extractor limit too: storyboards carry inline images.
        .layer(DefaultBodyLimit::max(state.config.max_body_size))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
