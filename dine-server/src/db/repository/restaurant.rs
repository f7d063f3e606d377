//! Restaurant Repository

use super::{RepoError, RepoResult};
use shared::models::{Restaurant, RestaurantCreate, RestaurantSettingsUpdate};
use sqlx::SqlitePool;

const SELECT_COLUMNS: &str = "SELECT id, name, description, cuisine, address, map_url, primary_color, secondary_color, background_color, font_choice FROM restaurant";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Restaurant>> {
    let restaurant = sqlx::query_as::<_, Restaurant>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(restaurant)
}

pub async fn create(pool: &SqlitePool, data: RestaurantCreate) -> RepoResult<Restaurant> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO restaurant (name, description, cuisine, address, map_url) VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.cuisine)
    .bind(&data.address)
    .bind(&data.map_url)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create restaurant".into()))
}

/// Partial update; absent fields keep their stored value
pub async fn update_settings(
    pool: &SqlitePool,
    id: i64,
    data: RestaurantSettingsUpdate,
) -> RepoResult<Restaurant> {
    let rows = sqlx::query(
        "UPDATE restaurant SET name = COALESCE(?1, name), description = COALESCE(?2, description), cuisine = COALESCE(?3, cuisine), address = COALESCE(?4, address), map_url = COALESCE(?5, map_url), primary_color = COALESCE(?6, primary_color), secondary_color = COALESCE(?7, secondary_color), background_color = COALESCE(?8, background_color), font_choice = COALESCE(?9, font_choice) WHERE id = ?10",
    )
    .bind(data.name)
    .bind(data.description)
    .bind(data.cuisine)
    .bind(data.address)
    .bind(data.map_url)
    .bind(data.primary_color)
    .bind(data.secondary_color)
    .bind(data.background_color)
    .bind(data.font_choice)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Restaurant {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;

    fn sample() -> RestaurantCreate {
        RestaurantCreate {
            name: "Spice Route".into(),
            description: Some("North Indian".into()),
            cuisine: Some("Indian".into()),
            address: None,
            map_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_applies_default_theme() {
        let pool = test_pool().await;
        let r = create(&pool, sample()).await.unwrap();
        assert_eq!(r.name, "Spice Route");
        assert_eq!(r.primary_color, "#2563eb");
        assert_eq!(r.secondary_color, "#1e40af");
        assert_eq!(r.background_color, "#ffffff");
        assert_eq!(r.font_choice, "Inter");
    }

    #[tokio::test]
    async fn test_update_settings_is_partial() {
        let pool = test_pool().await;
        let r = create(&pool, sample()).await.unwrap();
        let updated = update_settings(
            &pool,
            r.id,
            RestaurantSettingsUpdate {
                primary_color: Some("#ff0000".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.primary_color, "#ff0000");
        assert_eq!(updated.secondary_color, "#1e40af");
        assert_eq!(updated.description.as_deref(), Some("North Indian"));
    }

    #[tokio::test]
    async fn test_update_missing_restaurant() {
        let pool = test_pool().await;
        let err = update_settings(&pool, 42, RestaurantSettingsUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
