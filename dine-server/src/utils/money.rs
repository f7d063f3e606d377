//! Money calculation utilities using rust_decimal for precision
//!
//! Prices are stored and serialized as `f64` with 2 decimal places; every
//! calculation goes through `Decimal` and is rounded half-up on the way out.

use rust_decimal::prelude::*;
use shared::models::OrderItemDetail;

use crate::utils::{AppError, ErrorCode};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed menu price
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

fn invalid_price(message: String) -> AppError {
    AppError::with_message(ErrorCode::MenuItemInvalidPrice, message).with_detail("field", "price")
}

/// Validate a menu price and round it to 2 decimal places
pub fn normalize_price(value: f64) -> Result<f64, AppError> {
    if !value.is_finite() {
        return Err(invalid_price(format!("price must be a finite number, got {value}")));
    }
    if value < 0.0 {
        return Err(invalid_price(format!("price must be non-negative, got {value}")));
    }
    if value > MAX_PRICE {
        return Err(invalid_price(format!(
            "price exceeds maximum allowed ({MAX_PRICE}), got {value}"
        )));
    }
    Ok(to_f64(to_decimal(value)))
}

/// Parse a textual price (CSV cell) exactly, then validate it
pub fn parse_price(raw: &str) -> Result<f64, AppError> {
    let trimmed = raw.trim();
    let decimal = Decimal::from_str(trimmed)
        .map_err(|_| invalid_price(format!("price '{trimmed}' is not a number")))?;
    let value = decimal
        .to_f64()
        .ok_or_else(|| invalid_price(format!("price '{trimmed}' is out of range")))?;
    normalize_price(value)
}

/// Sum of `item_price * quantity` over the order lines
pub fn order_total(items: &[OrderItemDetail]) -> f64 {
    let total: Decimal = items
        .iter()
        .map(|item| to_decimal(item.item_price) * Decimal::from(item.quantity))
        .sum();
    to_f64(total)
}
