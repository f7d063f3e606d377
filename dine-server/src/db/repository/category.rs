//! Menu Category Repository

use super::{RepoError, RepoResult};
use shared::models::MenuCategory;
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool, restaurant_id: i64) -> RepoResult<Vec<MenuCategory>> {
    let categories = sqlx::query_as::<_, MenuCategory>(
        "SELECT id, restaurant_id, name FROM menu_category WHERE restaurant_id = ? ORDER BY name, id",
    )
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;
    Ok(categories)
}

pub async fn find_by_id(
    pool: &SqlitePool,
    restaurant_id: i64,
    id: i64,
) -> RepoResult<Option<MenuCategory>> {
    let category = sqlx::query_as::<_, MenuCategory>(
        "SELECT id, restaurant_id, name FROM menu_category WHERE id = ? AND restaurant_id = ?",
    )
    .bind(id)
    .bind(restaurant_id)
    .fetch_optional(pool)
    .await?;
    Ok(category)
}

pub async fn find_by_name(
    pool: &SqlitePool,
    restaurant_id: i64,
    name: &str,
) -> RepoResult<Option<MenuCategory>> {
    let category = sqlx::query_as::<_, MenuCategory>(
        "SELECT id, restaurant_id, name FROM menu_category WHERE restaurant_id = ? AND name = ? ORDER BY id LIMIT 1",
    )
    .bind(restaurant_id)
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(category)
}

pub async fn create(pool: &SqlitePool, restaurant_id: i64, name: &str) -> RepoResult<MenuCategory> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO menu_category (restaurant_id, name) VALUES (?, ?) RETURNING id",
    )
    .bind(restaurant_id)
    .bind(name)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, restaurant_id, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

/// Lookup-or-create by exact name within the restaurant
pub async fn get_or_create(
    pool: &SqlitePool,
    restaurant_id: i64,
    name: &str,
) -> RepoResult<MenuCategory> {
    if let Some(existing) = find_by_name(pool, restaurant_id, name).await? {
        return Ok(existing);
    }
    create(pool, restaurant_id, name).await
}

/// Items of a deleted category stay on the menu, uncategorized
pub async fn delete(pool: &SqlitePool, restaurant_id: i64, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM menu_category WHERE id = ? AND restaurant_id = ?")
        .bind(id)
        .bind(restaurant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::{seed_restaurant, test_pool};

    #[tokio::test]
    async fn test_get_or_create_reuses_existing() {
        let pool = test_pool().await;
        let rid = seed_restaurant(&pool, "A").await;

        let first = get_or_create(&pool, rid, "Starters").await.unwrap();
        let second = get_or_create(&pool, rid, "Starters").await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(find_all(&pool, rid).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_categories_are_scoped_by_restaurant() {
        let pool = test_pool().await;
        let a = seed_restaurant(&pool, "A").await;
        let b = seed_restaurant(&pool, "B").await;

        let cat = create(&pool, a, "Mains").await.unwrap();
        assert!(find_by_id(&pool, b, cat.id).await.unwrap().is_none());
        assert!(!delete(&pool, b, cat.id).await.unwrap());
        assert!(delete(&pool, a, cat.id).await.unwrap());
        assert!(find_all(&pool, a).await.unwrap().is_empty());
    }
}
