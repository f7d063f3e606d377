//! Order Repository

use std::collections::HashMap;

use super::menu_item::MenuItemRow;
use super::{RepoError, RepoResult};
use crate::utils::money;
use shared::models::{MenuItem, Order, OrderDetail, OrderItem, OrderItemDetail, OrderStatus};
use sqlx::{SqliteExecutor, SqlitePool};

const ORDER_COLUMNS: &str =
    "SELECT o.id, o.restaurant_id, o.table_number, o.status, o.estimated_wait_time, o.created_at FROM orders o";

const LINE_COLUMNS: &str = "SELECT oi.id AS line_id, oi.order_id, oi.quantity, oi.item_price, mi.id, mi.restaurant_id, mi.category_id, mi.name, mi.description, mi.price, mi.image, mi.is_veg, mi.is_non_veg, mi.is_jain, mi.is_chefs_special, mi.cooking_time_minutes, mc.name AS category_name FROM order_item oi JOIN orders o ON o.id = oi.order_id JOIN menu_item mi ON mi.id = oi.menu_item_id LEFT JOIN menu_category mc ON mc.id = mi.category_id";

#[derive(sqlx::FromRow)]
struct OrderLineRow {
    line_id: i64,
    order_id: i64,
    quantity: i32,
    item_price: f64,
    #[sqlx(flatten)]
    menu_item: MenuItemRow,
}

impl From<OrderLineRow> for OrderItemDetail {
    fn from(row: OrderLineRow) -> Self {
        OrderItemDetail {
            id: row.line_id,
            menu_item: MenuItem::from(row.menu_item),
            quantity: row.quantity,
            item_price: row.item_price,
        }
    }
}

fn assemble(order: Order, items: Vec<OrderItemDetail>) -> OrderDetail {
    let total = money::order_total(&items);
    OrderDetail::new(order, items, total)
}

pub async fn insert_order<'e, E>(
    executor: E,
    restaurant_id: i64,
    table_number: i64,
    estimated_wait_time: i32,
    created_at: i64,
) -> RepoResult<Order>
where
    E: SqliteExecutor<'e>,
{
    let order = sqlx::query_as::<_, Order>(
        "INSERT INTO orders (restaurant_id, table_number, status, estimated_wait_time, created_at) VALUES (?, ?, ?, ?, ?) RETURNING id, restaurant_id, table_number, status, estimated_wait_time, created_at",
    )
    .bind(restaurant_id)
    .bind(table_number)
    .bind(OrderStatus::Pending)
    .bind(estimated_wait_time)
    .bind(created_at)
    .fetch_one(executor)
    .await?;
    Ok(order)
}

pub async fn insert_item<'e, E>(
    executor: E,
    order_id: i64,
    menu_item_id: i64,
    quantity: i32,
    item_price: f64,
) -> RepoResult<OrderItem>
where
    E: SqliteExecutor<'e>,
{
    let item = sqlx::query_as::<_, OrderItem>(
        "INSERT INTO order_item (order_id, menu_item_id, quantity, item_price) VALUES (?, ?, ?, ?) RETURNING id, order_id, menu_item_id, quantity, item_price",
    )
    .bind(order_id)
    .bind(menu_item_id)
    .bind(quantity)
    .bind(item_price)
    .fetch_one(executor)
    .await?;
    Ok(item)
}

pub async fn find_by_id(pool: &SqlitePool, restaurant_id: i64, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "{ORDER_COLUMNS} WHERE o.id = ? AND o.restaurant_id = ?"
    ))
    .bind(id)
    .bind(restaurant_id)
    .fetch_optional(pool)
    .await?;
    Ok(order)
}

/// Order with its lines (menu items nested) and computed total
pub async fn find_detail(
    pool: &SqlitePool,
    restaurant_id: i64,
    id: i64,
) -> RepoResult<Option<OrderDetail>> {
    let Some(order) = find_by_id(pool, restaurant_id, id).await? else {
        return Ok(None);
    };
    let items = sqlx::query_as::<_, OrderLineRow>(&format!(
        "{LINE_COLUMNS} WHERE oi.order_id = ? AND o.restaurant_id = ? ORDER BY oi.id"
    ))
    .bind(id)
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(OrderItemDetail::from)
    .collect();
    Ok(Some(assemble(order, items)))
}

/// Orders whose table number is still registered, newest first
pub async fn list_for_registered_tables(
    pool: &SqlitePool,
    restaurant_id: i64,
) -> RepoResult<Vec<OrderDetail>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "{ORDER_COLUMNS} WHERE o.restaurant_id = ?1 AND EXISTS (SELECT 1 FROM dining_table t WHERE t.restaurant_id = ?1 AND t.number = o.table_number) ORDER BY o.created_at DESC, o.id DESC"
    ))
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;

    let mut lines: HashMap<i64, Vec<OrderItemDetail>> = HashMap::new();
    let rows = sqlx::query_as::<_, OrderLineRow>(&format!(
        "{LINE_COLUMNS} WHERE o.restaurant_id = ? ORDER BY oi.id"
    ))
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;
    for row in rows {
        lines.entry(row.order_id).or_default().push(row.into());
    }

    Ok(orders
        .into_iter()
        .map(|order| {
            let items = lines.remove(&order.id).unwrap_or_default();
            assemble(order, items)
        })
        .collect())
}

pub async fn update_status(
    pool: &SqlitePool,
    restaurant_id: i64,
    id: i64,
    status: OrderStatus,
) -> RepoResult<()> {
    let result = sqlx::query("UPDATE orders SET status = ? WHERE id = ? AND restaurant_id = ?")
        .bind(status)
        .bind(id)
        .bind(restaurant_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    Ok(())
}

/// Delete completed and cancelled orders; returns the number removed
pub async fn delete_terminal(pool: &SqlitePool, restaurant_id: i64) -> RepoResult<u64> {
    let terminal: Vec<OrderStatus> = OrderStatus::ALL
        .into_iter()
        .filter(OrderStatus::is_terminal)
        .collect();
    let placeholders = vec!["?"; terminal.len()].join(", ");
    let sql = format!("DELETE FROM orders WHERE restaurant_id = ? AND status IN ({placeholders})");

    let mut query = sqlx::query(&sql).bind(restaurant_id);
    for status in terminal {
        query = query.bind(status);
    }
    let result = query.execute(pool).await?;
    Ok(result.rows_affected())
}
