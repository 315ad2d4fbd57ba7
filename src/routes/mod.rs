pub mod api_routes;

use std::path::Path;

use axum::routing::{get, post};
use axum::Router;
use chat_core::endpoint::{CHAT_PATH, HEALTH_PATH};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::routes::api_routes::{chat_handler, health_handler};
use crate::service::relay_service::RelayService;

/// API routes plus the built widget. Unknown paths fall back to `index.html`
/// so the widget can be opened from any URL.
pub fn router(svc: RelayService, static_dir: &Path) -> Router {
    let widget = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route(CHAT_PATH, post(chat_handler))
        .route(HEALTH_PATH, get(health_handler))
        .fallback_service(widget)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(svc)
}
