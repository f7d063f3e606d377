//! Public diner handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use shared::models::{MenuSection, OrderCreate, OrderDetail, RestaurantSettings};

use crate::core::ServerState;
use crate::services::{catalog, orders, restaurant};
use crate::utils::AppResult;

/// GET /api/restaurants/{id}/menu/
pub async fn menu(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<i64>,
) -> AppResult<Json<Vec<MenuSection>>> {
    Ok(Json(catalog::get_menu(&state.db, restaurant_id).await?))
}

/// POST /api/restaurants/{id}/orders/
pub async fn place_order(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<i64>,
    payload: Result<Json<OrderCreate>, JsonRejection>,
) -> AppResult<(StatusCode, Json<OrderDetail>)> {
    let Json(payload) = payload?;
    let order = orders::place_order(&state.db, restaurant_id, payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/restaurants/{id}/orders/{order_id}/
pub async fn get_order(
    State(state): State<ServerState>,
    Path((restaurant_id, order_id)): Path<(i64, i64)>,
) -> AppResult<Json<OrderDetail>> {
    Ok(Json(orders::get_order(&state.db, restaurant_id, order_id).await?))
}

/// GET /api/restaurants/{id}/settings/
pub async fn settings(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<i64>,
) -> AppResult<Json<RestaurantSettings>> {
    Ok(Json(restaurant::get_settings(&state.db, restaurant_id).await?))
}
