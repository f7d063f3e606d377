//! Menu catalog
//!
//! Public menu assembly and the staff-side category and menu item
//! operations. Every operation is scoped to one restaurant.

use shared::models::{
    DEFAULT_COOKING_TIME_MINUTES, MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate,
    MenuSection,
};
use sqlx::SqlitePool;

use crate::db::repository::menu_item::NewMenuItem;
use crate::db::repository::{RepoError, category, menu_item, restaurant};
use crate::services::media::MediaStore;
use crate::services::restaurant_not_found;
use crate::utils::money::normalize_price;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_cooking_time,
    validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

fn category_not_found(category_id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::CategoryNotFound,
        format!("Category {category_id} not found"),
    )
    .with_detail("category_id", category_id)
}

fn item_not_found(item_id: i64) -> AppError {
    AppError::with_message(ErrorCode::MenuItemNotFound, format!("Menu item {item_id} not found"))
}

/// Images cleared by sending `null`, an empty string or the string "null"
fn normalize_image(image: Option<String>) -> Option<String> {
    image
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != "null")
}

// ── Public menu ─────────────────────────────────────────────────────

/// Categories (by name) with their items. Uncategorized items are not listed.
pub async fn get_menu(pool: &SqlitePool, restaurant_id: i64) -> AppResult<Vec<MenuSection>> {
    if restaurant::find_by_id(pool, restaurant_id).await?.is_none() {
        return Err(restaurant_not_found(restaurant_id));
    }

    let categories = category::find_all(pool, restaurant_id).await?;
    let mut items = menu_item::find_all(pool, restaurant_id).await?;

    let sections = categories
        .into_iter()
        .map(|category| {
            let (in_category, rest): (Vec<MenuItem>, Vec<MenuItem>) = items
                .drain(..)
                .partition(|item| item.category_id == Some(category.id));
            items = rest;
            MenuSection {
                id: category.id,
                name: category.name,
                items: in_category,
            }
        })
        .collect();
    Ok(sections)
}

// ── Categories ──────────────────────────────────────────────────────

pub async fn list_categories(pool: &SqlitePool, restaurant_id: i64) -> AppResult<Vec<MenuCategory>> {
    Ok(category::find_all(pool, restaurant_id).await?)
}

pub async fn create_category(
    pool: &SqlitePool,
    restaurant_id: i64,
    name: &str,
) -> AppResult<MenuCategory> {
    let name = name.trim();
    validate_required_text(name, "name", MAX_SHORT_TEXT_LEN)?;
    let created = category::create(pool, restaurant_id, name).await?;
    tracing::info!(restaurant_id, category_id = created.id, name = %created.name, "Category created");
    Ok(created)
}

/// Items of the deleted category stay on file without a category
pub async fn delete_category(pool: &SqlitePool, restaurant_id: i64, category_id: i64) -> AppResult<()> {
    if !category::delete(pool, restaurant_id, category_id).await? {
        return Err(category_not_found(category_id));
    }
    tracing::info!(restaurant_id, category_id, "Category deleted");
    Ok(())
}

async fn ensure_category(pool: &SqlitePool, restaurant_id: i64, category_id: i64) -> AppResult<()> {
    category::find_by_id(pool, restaurant_id, category_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| category_not_found(category_id))
}

// ── Menu items ──────────────────────────────────────────────────────

pub async fn list_items(pool: &SqlitePool, restaurant_id: i64) -> AppResult<Vec<MenuItem>> {
    Ok(menu_item::find_all(pool, restaurant_id).await?)
}

pub async fn get_item(pool: &SqlitePool, restaurant_id: i64, item_id: i64) -> AppResult<MenuItem> {
    menu_item::find_by_id(pool, restaurant_id, item_id)
        .await?
        .ok_or_else(|| item_not_found(item_id))
}

/// Validate a create payload into repository values
pub fn validate_new_item(payload: MenuItemCreate) -> AppResult<NewMenuItem> {
    let name = payload.name.trim().to_string();
    validate_required_text(&name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    let image = normalize_image(payload.image);
    validate_optional_text(&image, "image", MAX_URL_LEN)?;
    let price = normalize_price(payload.price)?;
    let cooking_time_minutes = payload
        .cooking_time_minutes
        .unwrap_or(DEFAULT_COOKING_TIME_MINUTES);
    validate_cooking_time(cooking_time_minutes)?;

    Ok(NewMenuItem {
        category_id: payload.category_id,
        name,
        description: payload.description,
        price,
        image,
        is_veg: payload.is_veg.unwrap_or(false),
        is_non_veg: payload.is_non_veg.unwrap_or(false),
        is_jain: payload.is_jain.unwrap_or(false),
        is_chefs_special: payload.is_chefs_special.unwrap_or(false),
        cooking_time_minutes,
    })
}

pub async fn create_item(
    pool: &SqlitePool,
    restaurant_id: i64,
    payload: MenuItemCreate,
) -> AppResult<MenuItem> {
    let data = validate_new_item(payload)?;
    if let Some(category_id) = data.category_id {
        ensure_category(pool, restaurant_id, category_id).await?;
    }
    let item = menu_item::create(pool, restaurant_id, data).await?;
    tracing::info!(restaurant_id, item_id = item.id, name = %item.name, "Menu item created");
    Ok(item)
}

/// Partial update; absent fields keep their value
pub async fn update_item(
    pool: &SqlitePool,
    restaurant_id: i64,
    item_id: i64,
    mut payload: MenuItemUpdate,
) -> AppResult<MenuItem> {
    if let Some(name) = payload.name.as_mut() {
        *name = name.trim().to_string();
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    if let Some(price) = payload.price {
        payload.price = Some(normalize_price(price)?);
    }
    if let Some(minutes) = payload.cooking_time_minutes {
        validate_cooking_time(minutes)?;
    }
    if let Some(image) = payload.image.take() {
        let image = normalize_image(image);
        validate_optional_text(&image, "image", MAX_URL_LEN)?;
        payload.image = Some(image);
    }
    if let Some(Some(category_id)) = payload.category_id {
        ensure_category(pool, restaurant_id, category_id).await?;
    }

    let item = menu_item::update(pool, restaurant_id, item_id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => item_not_found(item_id),
            other => other.into(),
        })?;
    tracing::info!(restaurant_id, item_id, "Menu item updated");
    Ok(item)
}

/// Deleting an item removes it from past orders too
pub async fn delete_item(pool: &SqlitePool, restaurant_id: i64, item_id: i64) -> AppResult<()> {
    if !menu_item::delete(pool, restaurant_id, item_id).await? {
        return Err(item_not_found(item_id));
    }
    tracing::info!(restaurant_id, item_id, "Menu item deleted");
    Ok(())
}

/// Store an uploaded dish photo and point the item at it.
///
/// A previously uploaded photo is removed once the item no longer
/// references it; external image URLs are left alone.
pub async fn set_item_image(
    pool: &SqlitePool,
    media: &MediaStore,
    restaurant_id: i64,
    item_id: i64,
    file_name: &str,
    data: Vec<u8>,
) -> AppResult<MenuItem> {
    let previous = get_item(pool, restaurant_id, item_id).await?.image;

    let relative = media.save_menu_image(file_name, data).await?;
    let update = MenuItemUpdate {
        image: Some(Some(MediaStore::url_of(&relative))),
        ..Default::default()
    };
    let item = match update_item(pool, restaurant_id, item_id, update).await {
        Ok(item) => item,
        Err(e) => {
            media.remove(&relative).await;
            return Err(e);
        }
    };

    if let Some(old) = previous.as_deref().and_then(MediaStore::relative_of) {
        media.remove(old).await;
    }
    Ok(item)
}
