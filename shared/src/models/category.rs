//! Menu Category Model

use serde::{Deserialize, Serialize};

use super::menu_item::MenuItem;

/// Menu category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuCategory {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
}

/// Compact category reference nested inside menu items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategoryCreate {
    pub name: String,
}

/// Category with its items, as served on the public menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuSection {
    pub id: i64,
    pub name: String,
    pub items: Vec<MenuItem>,
}
