pub mod routes;

use crate::state::AppState;
use axum::routing::{get, post};
use std::sync::Arc;

pub fn router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route("/health", get(routes::health))
        .route("/api/structure/{count}", get(routes::get_structure))
        .route("/api/payout", post(routes::post_payout))
        .route("/api/preview", post(routes::post_preview))
        .route("/api/score", post(routes::post_score))
        .route("/api/leaderboard", post(routes::post_leaderboard))
        .route("/api/counters", get(routes::get_counters))
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .with_state(state)
}
