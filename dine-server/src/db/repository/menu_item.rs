//! Menu Item Repository

use super::{RepoError, RepoResult};
use shared::models::{CategoryRef, MenuItem, MenuItemUpdate};
use sqlx::{SqliteExecutor, SqlitePool};

const SELECT_COLUMNS: &str = "SELECT mi.id, mi.restaurant_id, mi.category_id, mi.name, mi.description, mi.price, mi.image, mi.is_veg, mi.is_non_veg, mi.is_jain, mi.is_chefs_special, mi.cooking_time_minutes, mc.name AS category_name FROM menu_item mi LEFT JOIN menu_category mc ON mc.id = mi.category_id";

#[derive(sqlx::FromRow)]
pub(super) struct MenuItemRow {
    #[sqlx(flatten)]
    item: MenuItem,
    category_name: Option<String>,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        let mut item = row.item;
        item.category = item
            .category_id
            .zip(row.category_name)
            .map(|(id, name)| CategoryRef { id, name });
        item
    }
}

/// Validated values for a new menu item
#[derive(Debug, Clone)]
pub struct NewMenuItem {
    pub category_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image: Option<String>,
    pub is_veg: bool,
    pub is_non_veg: bool,
    pub is_jain: bool,
    pub is_chefs_special: bool,
    pub cooking_time_minutes: i32,
}

pub async fn find_all(pool: &SqlitePool, restaurant_id: i64) -> RepoResult<Vec<MenuItem>> {
    let rows = sqlx::query_as::<_, MenuItemRow>(&format!(
        "{SELECT_COLUMNS} WHERE mi.restaurant_id = ? ORDER BY mi.name, mi.id"
    ))
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(MenuItem::from).collect())
}

/// Works on the pool or inside an open transaction
pub async fn find_by_id<'e, E>(
    executor: E,
    restaurant_id: i64,
    id: i64,
) -> RepoResult<Option<MenuItem>>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query_as::<_, MenuItemRow>(&format!(
        "{SELECT_COLUMNS} WHERE mi.id = ? AND mi.restaurant_id = ?"
    ))
    .bind(id)
    .bind(restaurant_id)
    .fetch_optional(executor)
    .await?;
    Ok(row.map(MenuItem::from))
}

pub async fn create(
    pool: &SqlitePool,
    restaurant_id: i64,
    data: NewMenuItem,
) -> RepoResult<MenuItem> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO menu_item (restaurant_id, category_id, name, description, price, image, is_veg, is_non_veg, is_jain, is_chefs_special, cooking_time_minutes) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(restaurant_id)
    .bind(data.category_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.image)
    .bind(data.is_veg)
    .bind(data.is_non_veg)
    .bind(data.is_jain)
    .bind(data.is_chefs_special)
    .bind(data.cooking_time_minutes)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, restaurant_id, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

/// Partial update. Nullable fields use a "provided" flag so an explicit
/// `None` clears the column.
pub async fn update(
    pool: &SqlitePool,
    restaurant_id: i64,
    id: i64,
    data: MenuItemUpdate,
) -> RepoResult<MenuItem> {
    let set_category = data.category_id.is_some();
    let set_image = data.image.is_some();
    let rows = sqlx::query(
        "UPDATE menu_item SET category_id = CASE WHEN ?1 THEN ?2 ELSE category_id END, name = COALESCE(?3, name), description = COALESCE(?4, description), price = COALESCE(?5, price), image = CASE WHEN ?6 THEN ?7 ELSE image END, is_veg = COALESCE(?8, is_veg), is_non_veg = COALESCE(?9, is_non_veg), is_jain = COALESCE(?10, is_jain), is_chefs_special = COALESCE(?11, is_chefs_special), cooking_time_minutes = COALESCE(?12, cooking_time_minutes) WHERE id = ?13 AND restaurant_id = ?14",
    )
    .bind(set_category)
    .bind(data.category_id.flatten())
    .bind(data.name)
    .bind(data.description)
    .bind(data.price)
    .bind(set_image)
    .bind(data.image.flatten())
    .bind(data.is_veg)
    .bind(data.is_non_veg)
    .bind(data.is_jain)
    .bind(data.is_chefs_special)
    .bind(data.cooking_time_minutes)
    .bind(id)
    .bind(restaurant_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    find_by_id(pool, restaurant_id, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

/// Deleting an item also removes the order lines that reference it
pub async fn delete(pool: &SqlitePool, restaurant_id: i64, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM menu_item WHERE id = ? AND restaurant_id = ?")
        .bind(id)
        .bind(restaurant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
