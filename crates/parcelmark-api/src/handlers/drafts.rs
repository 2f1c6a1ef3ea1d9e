use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use parcelmark_core::models::GeoRing;

use super::parse_record_id;
use crate::dto::{
    CommitDraftRequest, CreateDraftRequest, DispatchResponse, RecordResponse, RenameDraftRequest,
};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/v1/drafts - A drawing completed on the map
pub async fn create_draft(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateDraftRequest>,
) -> Result<(StatusCode, Json<RecordResponse>), ApiError> {
    tracing::info!(vertices = request.vertices.len(), "Ring completed");

    let ring = GeoRing::from_pairs(&request.vertices).map_err(|e| {
        tracing::warn!(error = %e, "Rejected drawn ring");
        ApiError::from(e)
    })?;

    let mut session = state.session.lock().await;
    let draft = session.ring_completed(ring)?;

    Ok((StatusCode::CREATED, Json(RecordResponse::draft(draft))))
}

pub async fn get_draft(
    State(state): State<Arc<AppState>>,
    Path(draft_id): Path<String>,
) -> Result<Json<RecordResponse>, ApiError> {
    let id = parse_record_id(&draft_id)?;
    let session = state.session.lock().await;
    Ok(Json(RecordResponse::draft(session.draft(id)?)))
}

pub async fn rename_draft(
    State(state): State<Arc<AppState>>,
    Path(draft_id): Path<String>,
    Json(request): Json<RenameDraftRequest>,
) -> Result<Json<RecordResponse>, ApiError> {
    let id = parse_record_id(&draft_id)?;
    tracing::info!(draft_id = %id, name = %request.name, "Renaming draft");

    let mut session = state.session.lock().await;
    let draft = session.rename_draft(id, &request.name)?;
    Ok(Json(RecordResponse::draft(draft)))
}

/// POST /api/v1/drafts/{id}/commit - Save the draft to the polygon list.
///
/// The body is optional; without one the draft keeps its current name.
pub async fn commit_draft(
    State(state): State<Arc<AppState>>,
    Path(draft_id): Path<String>,
    request: Option<Json<CommitDraftRequest>>,
) -> Result<(StatusCode, Json<RecordResponse>), ApiError> {
    let id = parse_record_id(&draft_id)?;
    let request = request.map(|Json(body)| body).unwrap_or_default();

    let mut session = state.session.lock().await;
    let record = session.save_draft(id, request.name.as_deref())?;

    Ok((StatusCode::CREATED, Json(RecordResponse::stored(record))))
}

/// DELETE /api/v1/drafts/{id} - Close the naming dialog without saving
pub async fn discard_draft(
    State(state): State<Arc<AppState>>,
    Path(draft_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_record_id(&draft_id)?;
    state.session.lock().await.discard_draft(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/drafts/{id}/dispatch - Hand the parcel to the drone operator.
///
/// Placeholder integration: the request is only logged, and the draft is
/// closed without being saved.
pub async fn dispatch_draft(
    State(state): State<Arc<AppState>>,
    Path(draft_id): Path<String>,
) -> Result<Json<DispatchResponse>, ApiError> {
    let id = parse_record_id(&draft_id)?;

    let draft = state.session.lock().await.discard_draft(id)?;
    tracing::info!(
        draft_id = %id,
        name = %draft.name(),
        area_m2 = draft.area_m2(),
        estimated_price = draft.estimated_price(),
        "Dispatched polygon to drone operator"
    );

    Ok(Json(DispatchResponse::sent(draft.name())))
}
