//! Dining Table Repository

use super::RepoResult;
use shared::models::DiningTable;
use sqlx::{SqliteExecutor, SqlitePool};

pub async fn find_all(pool: &SqlitePool, restaurant_id: i64) -> RepoResult<Vec<DiningTable>> {
    let tables = sqlx::query_as::<_, DiningTable>(
        "SELECT id, restaurant_id, number, qr_code FROM dining_table WHERE restaurant_id = ? ORDER BY number",
    )
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;
    Ok(tables)
}

pub async fn find_by_id(
    pool: &SqlitePool,
    restaurant_id: i64,
    id: i64,
) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(
        "SELECT id, restaurant_id, number, qr_code FROM dining_table WHERE id = ? AND restaurant_id = ?",
    )
    .bind(id)
    .bind(restaurant_id)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

pub async fn find_by_number<'e, E>(
    executor: E,
    restaurant_id: i64,
    number: i64,
) -> RepoResult<Option<DiningTable>>
where
    E: SqliteExecutor<'e>,
{
    let table = sqlx::query_as::<_, DiningTable>(
        "SELECT id, restaurant_id, number, qr_code FROM dining_table WHERE restaurant_id = ? AND number = ?",
    )
    .bind(restaurant_id)
    .bind(number)
    .fetch_optional(executor)
    .await?;
    Ok(table)
}

/// Insert a table row; a second (restaurant, number) pair fails with
/// `RepoError::Duplicate` from the unique constraint.
pub async fn insert<'e, E>(executor: E, restaurant_id: i64, number: i64) -> RepoResult<DiningTable>
where
    E: SqliteExecutor<'e>,
{
    let table = sqlx::query_as::<_, DiningTable>(
        "INSERT INTO dining_table (restaurant_id, number) VALUES (?, ?) RETURNING id, restaurant_id, number, qr_code",
    )
    .bind(restaurant_id)
    .bind(number)
    .fetch_one(executor)
    .await?;
    Ok(table)
}

pub async fn set_qr_code<'e, E>(executor: E, id: i64, qr_code: &str) -> RepoResult<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query("UPDATE dining_table SET qr_code = ? WHERE id = ?")
        .bind(qr_code)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Unconditional delete; orders placed at the table are kept
pub async fn delete(pool: &SqlitePool, restaurant_id: i64, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM dining_table WHERE id = ? AND restaurant_id = ?")
        .bind(id)
        .bind(restaurant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
