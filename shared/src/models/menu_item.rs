//! Menu Item Model

use serde::{Deserialize, Deserializer, Serialize};

use super::category::CategoryRef;

pub const DEFAULT_COOKING_TIME_MINUTES: i32 = 10;

/// Menu item entity
///
/// `price` is kept as a 2-decimal amount; arithmetic on it goes through
/// `rust_decimal` on the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub restaurant_id: i64,
    pub category_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    /// Image reference (URL or media path)
    pub image: Option<String>,
    pub is_veg: bool,
    pub is_non_veg: bool,
    pub is_jain: bool,
    pub is_chefs_special: bool,
    pub cooking_time_minutes: i32,

    // -- Relations (populated by application code, skipped by FromRow) --
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub category: Option<CategoryRef>,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub category_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image: Option<String>,
    pub is_veg: Option<bool>,
    pub is_non_veg: Option<bool>,
    pub is_jain: Option<bool>,
    pub is_chefs_special: Option<bool>,
    pub cooking_time_minutes: Option<i32>,
}

/// Partial update payload
///
/// `image` and `category_id` distinguish "absent" (outer `None`, unchanged)
/// from an explicit `null` (inner `None`, cleared).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    #[serde(default, deserialize_with = "nullable")]
    pub category_id: Option<Option<i64>>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "nullable")]
    pub image: Option<Option<String>>,
    pub is_veg: Option<bool>,
    pub is_non_veg: Option<bool>,
    pub is_jain: Option<bool>,
    pub is_chefs_special: Option<bool>,
    pub cooking_time_minutes: Option<i32>,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
