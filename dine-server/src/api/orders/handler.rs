//! Staff order handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use shared::models::{OrderDetail, OrderStatusUpdate};

use crate::auth::CurrentStaff;
use crate::core::ServerState;
use crate::services::orders;
use crate::utils::{ApiResponse, AppResult};

/// GET /admin/orders/ - orders of registered tables, newest first
pub async fn list(
    State(state): State<ServerState>,
    staff: CurrentStaff,
) -> AppResult<Json<Vec<OrderDetail>>> {
    Ok(Json(orders::list_orders(&state.db, staff.restaurant_id).await?))
}

/// PUT /admin/orders/{order_id}/
pub async fn update_status(
    State(state): State<ServerState>,
    staff: CurrentStaff,
    Path(order_id): Path<i64>,
    payload: Result<Json<OrderStatusUpdate>, JsonRejection>,
) -> AppResult<Json<OrderDetail>> {
    let Json(payload) = payload?;
    let order = orders::update_status(&state.db, staff.restaurant_id, order_id, &payload.status).await?;
    tracing::debug!(staff_id = staff.id, order_id, "Order status set by staff");
    Ok(Json(order))
}

/// DELETE /admin/orders/ - drop completed and cancelled orders
pub async fn bulk_clear(
    State(state): State<ServerState>,
    staff: CurrentStaff,
) -> AppResult<ApiResponse<u64>> {
    let removed = orders::bulk_clear(&state.db, staff.restaurant_id).await?;
    Ok(ApiResponse::success_with_message(
        format!("Cleared {removed} orders."),
        removed,
    ))
}
