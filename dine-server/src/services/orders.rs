//! Order workflow
//!
//! Diner order placement and the staff status operations. Placement
//! validates every input before writing anything, then persists the order
//! and its lines in one transaction.

use shared::models::{MenuItem, OrderCreate, OrderDetail, OrderStatus};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::db::repository::{RepoError, dining_table, menu_item, order, restaurant};
use crate::services::restaurant_not_found;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Estimated wait: the longest preparation time among the ordered items
/// (items are prepared in parallel). Zero for an empty order.
pub fn estimate_wait_time<I>(cooking_times: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    cooking_times.into_iter().max().unwrap_or(0).max(0)
}

fn order_not_found(order_id: i64) -> AppError {
    AppError::with_message(ErrorCode::OrderNotFound, format!("Order {order_id} not found"))
}

/// Place a diner order
pub async fn place_order(
    pool: &SqlitePool,
    restaurant_id: i64,
    request: OrderCreate,
) -> AppResult<OrderDetail> {
    if restaurant::find_by_id(pool, restaurant_id).await?.is_none() {
        return Err(restaurant_not_found(restaurant_id));
    }

    let table_number = request
        .table_number
        .ok_or_else(|| AppError::required("table_number"))?;
    if dining_table::find_by_number(pool, restaurant_id, table_number)
        .await?
        .is_none()
    {
        return Err(AppError::with_message(
            ErrorCode::InvalidTable,
            format!("Invalid table number: {table_number}. This table is not registered."),
        )
        .with_detail("table_number", table_number));
    }

    // Resolve every line before the first write
    let mut resolved: Vec<(MenuItem, i32)> = Vec::with_capacity(request.items.len());
    for (index, line) in request.items.iter().enumerate() {
        if line.quantity < 1 {
            return Err(AppError::with_message(
                ErrorCode::InvalidQuantity,
                format!("Quantity must be at least 1, got {}", line.quantity),
            )
            .with_detail("line", index)
            .with_detail("quantity", line.quantity));
        }
        let item = menu_item::find_by_id(pool, restaurant_id, line.menu_item)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::MenuItemNotFound,
                    format!("Menu item {} not found", line.menu_item),
                )
                .with_detail("menu_item", line.menu_item)
            })?;
        resolved.push((item, line.quantity));
    }

    let wait = estimate_wait_time(resolved.iter().map(|(item, _)| item.cooking_time_minutes));

    let mut tx = pool.begin().await?;
    let created = order::insert_order(&mut *tx, restaurant_id, table_number, wait, now_millis()).await?;
    for (item, quantity) in &resolved {
        order::insert_item(&mut *tx, created.id, item.id, *quantity, item.price).await?;
    }
    tx.commit().await?;

    tracing::info!(
        restaurant_id,
        order_id = created.id,
        table_number,
        lines = resolved.len(),
        estimated_wait_time = wait,
        "Order placed"
    );

    get_order(pool, restaurant_id, created.id).await
}

/// Order with lines, scoped to the restaurant
pub async fn get_order(pool: &SqlitePool, restaurant_id: i64, order_id: i64) -> AppResult<OrderDetail> {
    order::find_detail(pool, restaurant_id, order_id)
        .await?
        .ok_or_else(|| order_not_found(order_id))
}

/// Staff order board: orders at still-registered tables, newest first
pub async fn list_orders(pool: &SqlitePool, restaurant_id: i64) -> AppResult<Vec<OrderDetail>> {
    Ok(order::list_for_registered_tables(pool, restaurant_id).await?)
}

/// Parse a status string from the wire
pub fn parse_status(raw: &str) -> AppResult<OrderStatus> {
    raw.trim().to_lowercase().parse::<OrderStatus>().map_err(|e| {
        AppError::with_message(
            ErrorCode::InvalidOrderStatus,
            format!("\"{}\" is not a valid status", e.0),
        )
        .with_detail("status", raw)
    })
}

/// Set an order's status. Any status may follow any other.
pub async fn update_status(
    pool: &SqlitePool,
    restaurant_id: i64,
    order_id: i64,
    status: &str,
) -> AppResult<OrderDetail> {
    let status = parse_status(status)?;
    order::update_status(pool, restaurant_id, order_id, status)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => order_not_found(order_id),
            other => other.into(),
        })?;
    tracing::info!(restaurant_id, order_id, status = %status, "Order status updated");
    get_order(pool, restaurant_id, order_id).await
}

/// Remove completed and cancelled orders of the restaurant
pub async fn bulk_clear(pool: &SqlitePool, restaurant_id: i64) -> AppResult<u64> {
    let removed = order::delete_terminal(pool, restaurant_id).await?;
    tracing::info!(restaurant_id, removed, "Cleared finished orders");
    Ok(removed)
}
