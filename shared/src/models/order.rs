//! Order Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::menu_item::MenuItem;

/// Order status
///
/// Staff may move an order to any status; there is no transition graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Completed and cancelled orders are eligible for bulk clearing
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown status string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOrderStatus(pub String);

impl fmt::Display for UnknownOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown order status: {}", self.0)
    }
}

impl std::error::Error for UnknownOrderStatus {}

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownOrderStatus(s.to_string()))
    }
}

/// Order row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub restaurant_id: i64,
    pub table_number: i64,
    pub status: OrderStatus,
    /// Minutes, fixed at creation
    pub estimated_wait_time: i32,
    pub created_at: i64,
}

/// Order line row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i32,
    /// Price snapshot taken when the order was placed
    pub item_price: f64,
}

/// Order line as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemDetail {
    pub id: i64,
    pub menu_item: MenuItem,
    pub quantity: i32,
    pub item_price: f64,
}

/// Full order view with its lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: i64,
    pub restaurant_id: i64,
    pub table_number: i64,
    pub status: OrderStatus,
    pub estimated_wait_time: i32,
    pub created_at: i64,
    pub items: Vec<OrderItemDetail>,
    /// Sum of `item_price * quantity` over the lines
    pub total: f64,
}

impl OrderDetail {
    pub fn new(order: Order, items: Vec<OrderItemDetail>, total: f64) -> Self {
        Self {
            id: order.id,
            restaurant_id: order.restaurant_id,
            table_number: order.table_number,
            status: order.status,
            estimated_wait_time: order.estimated_wait_time,
            created_at: order.created_at,
            items,
            total,
        }
    }
}

/// One requested (menu item, quantity) pairing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineInput {
    #[serde(alias = "menu_item_id")]
    pub menu_item: i64,
    pub quantity: i32,
}

/// Diner order placement payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub table_number: Option<i64>,
    pub items: Vec<OrderLineInput>,
}

/// Staff status update payload (parsed explicitly for a field-level error)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!("pending".parse::<OrderStatus>(), Ok(OrderStatus::Pending));
        assert_eq!("cancelled".parse::<OrderStatus>(), Ok(OrderStatus::Cancelled));
        assert!("served".parse::<OrderStatus>().is_err());
        assert!("Pending".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_status_terminal() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Preparing.is_terminal());
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_line_accepts_menu_item_id_alias() {
        let line: OrderLineInput =
            serde_json::from_str(r#"{"menu_item_id": 7, "quantity": 2}"#).unwrap();
        assert_eq!(line.menu_item, 7);
        let line: OrderLineInput = serde_json::from_str(r#"{"menu_item": 8, "quantity": 1}"#).unwrap();
        assert_eq!(line.menu_item, 8);
    }

    #[test]
    fn test_order_create_requires_items() {
        assert!(serde_json::from_str::<OrderCreate>(r#"{"table_number": 1}"#).is_err());
        let empty: OrderCreate =
            serde_json::from_str(r#"{"table_number": 1, "items": []}"#).unwrap();
        assert!(empty.items.is_empty());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Preparing).unwrap(),
            "\"preparing\""
        );
    }
}
