use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::handlers::{status, video_feed};
use crate::state::AppState;

/// Builds the application router. CORS is wide open so a locally-served
/// frontend on another port can embed the stream.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/video_feed", get(video_feed))
        .route("/status", get(status))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
