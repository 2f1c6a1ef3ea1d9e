use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use geojson::FeatureCollection;

use super::parse_record_id;
use crate::dto::{DeleteResponse, RecordResponse};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_polygons(State(state): State<Arc<AppState>>) -> Json<Vec<RecordResponse>> {
    let session = state.session.lock().await;
    Json(session.list().iter().map(RecordResponse::stored).collect())
}

pub async fn delete_polygon(
    State(state): State<Arc<AppState>>,
    Path(polygon_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    tracing::info!(polygon_id = %polygon_id, "Deleting polygon");

    let id = parse_record_id(&polygon_id)?;
    let removed = state.session.lock().await.remove(id);

    Ok(Json(DeleteResponse::new("polygon", &polygon_id, removed)))
}

/// GET /api/v1/export/geojson - Stored polygons as a FeatureCollection
pub async fn export_geojson(State(state): State<Arc<AppState>>) -> Json<FeatureCollection> {
    let session = state.session.lock().await;
    Json(session.store().to_feature_collection())
}
