use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use parcelmark_geocode::LookupOutcome;

use crate::dto::{ConfigResponse, SearchParams, SearchResponse, ViewResponse};
use crate::state::AppState;

pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    Json(ConfigResponse::from(&state.config))
}

pub async fn get_view(State(state): State<Arc<AppState>>) -> Json<ViewResponse> {
    let view = state.session.lock().await.view();
    let settings = &state.view_settings;
    Json(ViewResponse::new(view, settings.search_zoom, &settings.tile_url))
}

/// GET /api/v1/search?q= - Geocode free text and recenter the map.
///
/// The session lock is released while the geocoder is awaited, so drawing
/// and saving stay responsive during a slow lookup.
pub async fn search_location(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let zoom = state.view_settings.search_zoom;
    let query = params.q.unwrap_or_default();

    if query.trim().is_empty() {
        return Json(SearchResponse::new(&LookupOutcome::Skipped, true, zoom));
    }

    let ticket = state.session.lock().await.begin_search();
    let outcome = state.lookup.lookup(&query).await;
    let applied = state.session.lock().await.finish_search(ticket, &outcome, zoom);

    Json(SearchResponse::new(&outcome, applied, zoom))
}
