//! Restaurant Model

use serde::{Deserialize, Serialize};

pub const DEFAULT_PRIMARY_COLOR: &str = "#2563eb";
pub const DEFAULT_SECONDARY_COLOR: &str = "#1e40af";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
pub const DEFAULT_FONT_CHOICE: &str = "Inter";

/// Restaurant entity (tenant root; owns menu, tables, orders, staff)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub address: Option<String>,
    pub map_url: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
    pub font_choice: String,
}

/// Create restaurant payload (bootstrap only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub address: Option<String>,
    pub map_url: Option<String>,
}

/// Theme and profile settings exposed to staff and diners
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantSettings {
    pub name: String,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub address: Option<String>,
    pub map_url: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
    pub font_choice: String,
}

impl From<Restaurant> for RestaurantSettings {
    fn from(r: Restaurant) -> Self {
        Self {
            name: r.name,
            description: r.description,
            cuisine: r.cuisine,
            address: r.address,
            map_url: r.map_url,
            primary_color: r.primary_color,
            secondary_color: r.secondary_color,
            background_color: r.background_color,
            font_choice: r.font_choice,
        }
    }
}

/// Partial settings update (absent fields stay unchanged)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantSettingsUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub address: Option<String>,
    pub map_url: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub background_color: Option<String>,
    pub font_choice: Option<String>,
}
