//! Service layer
//!
//! Domain operations on top of the repositories. Every function receives
//! the restaurant it acts on as an explicit argument.
//!
//! - [`orders`] - diner order placement and staff status management
//! - [`tables`] - table registry
//! - [`qr_code`] - table QR code rendering and provisioning
//! - [`catalog`] - public menu, categories and menu items
//! - [`menu_import`] - CSV bulk import
//! - [`restaurant`] - theme settings and first-run bootstrap
//! - [`media`] - media file storage

pub mod catalog;
pub mod media;
pub mod menu_import;
pub mod orders;
pub mod qr_code;
pub mod restaurant;
pub mod tables;

pub use media::MediaStore;
pub use qr_code::QrCodeService;

use crate::utils::{AppError, ErrorCode};

pub(crate) fn restaurant_not_found(restaurant_id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::RestaurantNotFound,
        format!("Restaurant {restaurant_id} not found"),
    )
}
