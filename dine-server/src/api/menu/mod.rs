//! Menu item routes
//!
//! | Path | Method | Result |
//! |------|--------|--------|
//! | /admin/menu/ | GET | all items of the restaurant |
//! | /admin/menu/ | POST | 201, created item |
//! | /admin/menu/{id}/ | GET / PATCH / DELETE | item, partial update, 204 |
//! | /admin/menu/{id}/image/ | POST | multipart `file`, stored as JPEG |
//! | /admin/menu/csv-upload/ | POST | multipart `file`, import report |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/admin/menu/", get(handler::list).post(handler::create))
        .route("/admin/menu/csv-upload/", post(handler::csv_upload))
        .route(
            "/admin/menu/{id}/",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
        .route("/admin/menu/{id}/image/", post(handler::upload_image))
}
