//! Menu category routes

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/admin/categories/", get(handler::list).post(handler::create))
        .route("/admin/categories/{id}/", delete(handler::delete))
}
