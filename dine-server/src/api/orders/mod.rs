//! Staff order board

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/admin/orders/", get(handler::list).delete(handler::bulk_clear))
        .route("/admin/orders/{order_id}/", put(handler::update_status))
}
