use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower::ServiceBuilder;
use axum::extract::DefaultBodyLimit;

use super::handlers::*;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/zones", get(get_zones))
        .route("/api/zones.geojson", get(get_zones_geojson))
        .route("/api/batch", post(upload_batch))
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB limit
                .layer(CorsLayer::permissive())
        )
        .with_state(state)
}
