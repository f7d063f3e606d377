//! Staff authentication routes
//!
//! Both routes sit under `/admin/auth/`, which `require_auth` lets through
//! without a token.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/admin/auth/login/", post(handler::login))
        .route("/admin/auth/refresh/", post(handler::refresh))
}
