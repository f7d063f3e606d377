//! Restaurant settings routes (staff side)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/admin/settings/", get(handler::get).put(handler::update))
}
