//! Dining table routes

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/admin/tables/", get(handler::list).post(handler::register))
        .route("/admin/tables/{id}/", delete(handler::delete))
}
