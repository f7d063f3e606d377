//! Restaurant settings handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use shared::models::{RestaurantSettings, RestaurantSettingsUpdate};

use crate::auth::CurrentStaff;
use crate::core::ServerState;
use crate::services::restaurant;
use crate::utils::AppResult;

/// GET /admin/settings/
pub async fn get(
    State(state): State<ServerState>,
    staff: CurrentStaff,
) -> AppResult<Json<RestaurantSettings>> {
    Ok(Json(restaurant::get_settings(&state.db, staff.restaurant_id).await?))
}

/// PUT /admin/settings/ - absent fields keep their value
pub async fn update(
    State(state): State<ServerState>,
    staff: CurrentStaff,
    payload: Result<Json<RestaurantSettingsUpdate>, JsonRejection>,
) -> AppResult<Json<RestaurantSettings>> {
    let Json(payload) = payload?;
    Ok(Json(
        restaurant::update_settings(&state.db, staff.restaurant_id, payload).await?,
    ))
}
