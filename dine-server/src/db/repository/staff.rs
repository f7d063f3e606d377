//! Staff Repository

use super::{RepoError, RepoResult};
use crate::db::models::Staff;
use sqlx::SqlitePool;

const SELECT_COLUMNS: &str =
    "SELECT id, restaurant_id, username, password_hash, is_active, created_at FROM staff";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Staff>> {
    let staff = sqlx::query_as::<_, Staff>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(staff)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<Staff>> {
    let staff = sqlx::query_as::<_, Staff>(&format!("{SELECT_COLUMNS} WHERE username = ? LIMIT 1"))
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(staff)
}

/// `password_hash` must already be an argon2 PHC string
pub async fn create(
    pool: &SqlitePool,
    restaurant_id: i64,
    username: &str,
    password_hash: &str,
    created_at: i64,
) -> RepoResult<Staff> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO staff (restaurant_id, username, password_hash, is_active, created_at) VALUES (?, ?, ?, 1, ?) RETURNING id",
    )
    .bind(restaurant_id)
    .bind(username)
    .bind(password_hash)
    .bind(created_at)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create staff".into()))
}

pub async fn set_active(pool: &SqlitePool, id: i64, is_active: bool) -> RepoResult<()> {
    let result = sqlx::query("UPDATE staff SET is_active = ? WHERE id = ?")
        .bind(is_active)
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Staff {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::{seed_restaurant, test_pool};

    #[tokio::test]
    async fn test_create_and_lookup() {
        let pool = test_pool().await;
        let rid = seed_restaurant(&pool, "A").await;
        let staff = create(&pool, rid, "manager", "$argon2id$stub", 1).await.unwrap();

        let found = find_by_username(&pool, "manager").await.unwrap().unwrap();
        assert_eq!(found.id, staff.id);
        assert_eq!(found.restaurant_id, rid);
        assert!(found.is_active);
        assert!(find_by_username(&pool, "nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_username_is_unique() {
        let pool = test_pool().await;
        let rid = seed_restaurant(&pool, "A").await;
        create(&pool, rid, "manager", "h", 1).await.unwrap();
        let err = create(&pool, rid, "manager", "h", 2).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_set_active() {
        let pool = test_pool().await;
        let rid = seed_restaurant(&pool, "A").await;
        let staff = create(&pool, rid, "waiter", "h", 1).await.unwrap();
        set_active(&pool, staff.id, false).await.unwrap();
        assert!(!find_by_id(&pool, staff.id).await.unwrap().unwrap().is_active);
    }
}
