//! API routes
//!
//! # Structure
//!
//! Public (diner app, no token):
//! - [`health`] - liveness check
//! - [`restaurants`] - menu, order placement/tracking and theme per restaurant
//!
//! Staff (`/admin/`, bearer access token except `/admin/auth/`):
//! - [`auth`] - login and token refresh
//! - [`orders`] - order board, status updates, bulk clear
//! - [`categories`] - menu categories
//! - [`menu`] - menu items, CSV import, dish photos
//! - [`settings`] - restaurant profile and theme
//! - [`tables`] - table registration with QR codes
//!
//! Request bodies are taken as `Result<Json<T>, JsonRejection>` so a
//! malformed body turns into the usual error envelope instead of axum's
//! plain-text rejection.

pub mod auth;
pub mod categories;
pub mod health;
pub mod menu;
pub mod orders;
pub mod restaurants;
pub mod settings;
pub mod tables;

use axum::Router;

use crate::core::ServerState;

pub use crate::utils::{AppError, AppResult};

/// Every route of the application, without middleware
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(restaurants::router())
        .merge(auth::router())
        .merge(orders::router())
        .merge(categories::router())
        .merge(menu::router())
        .merge(settings::router())
        .merge(tables::router())
}
