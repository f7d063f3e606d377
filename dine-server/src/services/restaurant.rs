//! Restaurant profile and theme settings

use shared::models::{RestaurantCreate, RestaurantSettings, RestaurantSettingsUpdate};
use sqlx::SqlitePool;

use crate::db::models::Staff;
use crate::db::repository::{RepoError, restaurant, staff};
use crate::services::restaurant_not_found;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_FONT_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_PASSWORD_LEN,
    MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_hex_color, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

pub async fn get_settings(pool: &SqlitePool, restaurant_id: i64) -> AppResult<RestaurantSettings> {
    restaurant::find_by_id(pool, restaurant_id)
        .await?
        .map(RestaurantSettings::from)
        .ok_or_else(|| restaurant_not_found(restaurant_id))
}

fn validate_settings(update: &mut RestaurantSettingsUpdate) -> AppResult<()> {
    if let Some(name) = update.name.as_mut() {
        *name = name.trim().to_string();
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&update.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&update.cuisine, "cuisine", MAX_NAME_LEN)?;
    validate_optional_text(&update.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&update.map_url, "map_url", MAX_URL_LEN)?;

    for (field, value) in [
        ("primary_color", &mut update.primary_color),
        ("secondary_color", &mut update.secondary_color),
        ("background_color", &mut update.background_color),
    ] {
        if let Some(color) = value {
            *color = color.trim().to_lowercase();
            validate_hex_color(color, field)?;
        }
    }

    if let Some(font) = update.font_choice.as_mut() {
        *font = font.trim().to_string();
        if font.is_empty() || font.len() > MAX_FONT_LEN {
            return Err(AppError::with_message(
                ErrorCode::InvalidTheme,
                format!("font_choice must be 1 to {MAX_FONT_LEN} characters"),
            )
            .with_detail("field", "font_choice"));
        }
    }
    Ok(())
}

/// Partial settings update
pub async fn update_settings(
    pool: &SqlitePool,
    restaurant_id: i64,
    mut update: RestaurantSettingsUpdate,
) -> AppResult<RestaurantSettings> {
    validate_settings(&mut update)?;
    let updated = restaurant::update_settings(pool, restaurant_id, update)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => restaurant_not_found(restaurant_id),
            other => other.into(),
        })?;
    tracing::info!(restaurant_id, "Restaurant settings updated");
    Ok(updated.into())
}

/// First-run account provisioning
#[derive(Debug, Clone)]
pub struct BootstrapAccount {
    pub restaurant_name: String,
    pub username: String,
    pub password: String,
}

/// Create the restaurant and its staff account unless the username is
/// already taken. Returns the staff account either way.
pub async fn bootstrap(pool: &SqlitePool, account: &BootstrapAccount) -> AppResult<Staff> {
    let username = account.username.trim();
    validate_required_text(username, "username", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&account.password, "password", MAX_PASSWORD_LEN)?;

    if let Some(existing) = staff::find_by_username(pool, username).await? {
        tracing::debug!(username, "Bootstrap account already exists");
        return Ok(existing);
    }

    let created_restaurant = restaurant::create(
        pool,
        RestaurantCreate {
            name: account.restaurant_name.trim().to_string(),
            description: None,
            cuisine: None,
            address: None,
            map_url: None,
        },
    )
    .await?;
    let password_hash = Staff::hash_password(&account.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
    let account = staff::create(
        pool,
        created_restaurant.id,
        username,
        &password_hash,
        shared::util::now_millis(),
    )
    .await?;

    tracing::info!(
        restaurant_id = created_restaurant.id,
        restaurant = %created_restaurant.name,
        username = %account.username,
        "Bootstrapped restaurant and staff account"
    );
    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::{seed_restaurant, test_pool};
    use shared::models::{DEFAULT_FONT_CHOICE, DEFAULT_PRIMARY_COLOR};

    #[tokio::test]
    async fn test_settings_defaults_and_partial_update() {
        let pool = test_pool().await;
        let rid = seed_restaurant(&pool, "Spice Route").await;

        let settings = get_settings(&pool, rid).await.unwrap();
        assert_eq!(settings.primary_color, DEFAULT_PRIMARY_COLOR);
        assert_eq!(settings.font_choice, DEFAULT_FONT_CHOICE);

        let updated = update_settings(
            &pool,
            rid,
            RestaurantSettingsUpdate {
                primary_color: Some("#FF5500".into()),
                font_choice: Some("Poppins".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.primary_color, "#ff5500");
        assert_eq!(updated.font_choice, "Poppins");
        assert_eq!(updated.secondary_color, "#1e40af");
        assert_eq!(updated.name, "Spice Route");
    }

    #[tokio::test]
    async fn test_settings_validation() {
        let pool = test_pool().await;
        let rid = seed_restaurant(&pool, "Spice Route").await;

        let err = update_settings(
            &pool,
            rid,
            RestaurantSettingsUpdate {
                background_color: Some("white".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTheme);

        let err = update_settings(
            &pool,
            rid,
            RestaurantSettingsUpdate {
                font_choice: Some("   ".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTheme);

        let err = get_settings(&pool, rid + 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RestaurantNotFound);
        let err = update_settings(&pool, rid + 1, RestaurantSettingsUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RestaurantNotFound);
    }

    #[tokio::test]
    async fn test_bootstrap_runs_once() {
        let pool = test_pool().await;
        let account = BootstrapAccount {
            restaurant_name: "My Restaurant".into(),
            username: "owner".into(),
            password: "correct horse".into(),
        };

        let first = bootstrap(&pool, &account).await.unwrap();
        assert!(first.verify_password("correct horse").unwrap());
        let second = bootstrap(&pool, &account).await.unwrap();
        assert_eq!(first.id, second.id);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM restaurant")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
        let settings = get_settings(&pool, first.restaurant_id).await.unwrap();
        assert_eq!(settings.name, "My Restaurant");
    }
}
