//! Dining table handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use shared::models::{DiningTable, DiningTableCreate};

use crate::auth::CurrentStaff;
use crate::core::ServerState;
use crate::services::tables;
use crate::utils::AppResult;

/// GET /admin/tables/
pub async fn list(
    State(state): State<ServerState>,
    staff: CurrentStaff,
) -> AppResult<Json<Vec<DiningTable>>> {
    Ok(Json(tables::list(&state.db, staff.restaurant_id).await?))
}

/// POST /admin/tables/ - registers the number and renders its QR code
pub async fn register(
    State(state): State<ServerState>,
    staff: CurrentStaff,
    payload: Result<Json<DiningTableCreate>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DiningTable>)> {
    let Json(payload) = payload?;
    let table = tables::register(&state.db, &state.qr, staff.restaurant_id, payload.number).await?;
    Ok((StatusCode::CREATED, Json(table)))
}

/// DELETE /admin/tables/{id}/
pub async fn delete(
    State(state): State<ServerState>,
    staff: CurrentStaff,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    tables::remove(&state.db, &state.qr, staff.restaurant_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
