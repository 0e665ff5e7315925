// HTTP router for the data endpoint and the browser front end
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_data, health_check};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    let index = ServeFile::new(state.static_dir.join("index.html"));
    let assets = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/data", get(get_data))
        .route_service("/", index)
        .nest_service("/static", assets)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
