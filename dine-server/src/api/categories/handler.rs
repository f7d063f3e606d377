//! Menu category handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use shared::models::{MenuCategory, MenuCategoryCreate};

use crate::auth::CurrentStaff;
use crate::core::ServerState;
use crate::services::catalog;
use crate::utils::AppResult;

/// GET /admin/categories/
pub async fn list(
    State(state): State<ServerState>,
    staff: CurrentStaff,
) -> AppResult<Json<Vec<MenuCategory>>> {
    Ok(Json(catalog::list_categories(&state.db, staff.restaurant_id).await?))
}

/// POST /admin/categories/
pub async fn create(
    State(state): State<ServerState>,
    staff: CurrentStaff,
    payload: Result<Json<MenuCategoryCreate>, JsonRejection>,
) -> AppResult<(StatusCode, Json<MenuCategory>)> {
    let Json(payload) = payload?;
    let category = catalog::create_category(&state.db, staff.restaurant_id, &payload.name).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// DELETE /admin/categories/{id}/ - items stay, uncategorized
pub async fn delete(
    State(state): State<ServerState>,
    staff: CurrentStaff,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    catalog::delete_category(&state.db, staff.restaurant_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
