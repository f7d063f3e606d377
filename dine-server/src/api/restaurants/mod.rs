//! Public diner routes
//!
//! | Path | Method | Result |
//! |------|--------|--------|
//! | /api/restaurants/{id}/menu/ | GET | categories with nested items |
//! | /api/restaurants/{id}/orders/ | POST | 201, placed order |
//! | /api/restaurants/{id}/orders/{order_id}/ | GET | order with items |
//! | /api/restaurants/{id}/settings/ | GET | profile and theme |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/restaurants/{restaurant_id}", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/menu/", get(handler::menu))
        .route("/orders/", post(handler::place_order))
        .route("/orders/{order_id}/", get(handler::get_order))
        .route("/settings/", get(handler::settings))
}
