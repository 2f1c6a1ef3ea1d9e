use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Map
        .route("/api/v1/config", get(handlers::get_config))
        .route("/api/v1/view", get(handlers::get_view))
        .route("/api/v1/search", get(handlers::search_location))

        // Drafts
        .route("/api/v1/drafts", post(handlers::create_draft))
        .route(
            "/api/v1/drafts/{draft_id}",
            get(handlers::get_draft).patch(handlers::rename_draft).delete(handlers::discard_draft),
        )
        .route("/api/v1/drafts/{draft_id}/commit", post(handlers::commit_draft))
        .route("/api/v1/drafts/{draft_id}/dispatch", post(handlers::dispatch_draft))

        // Stored polygons
        .route("/api/v1/polygons", get(handlers::list_polygons))
        .route("/api/v1/polygons/{polygon_id}", delete(handlers::delete_polygon))
        .route("/api/v1/export/geojson", get(handlers::export_geojson))

        .with_state(state)
}
