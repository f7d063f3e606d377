//! Menu item handlers

use axum::{
    Json,
    extract::{
        Multipart, Path, State, multipart::MultipartRejection, rejection::JsonRejection,
    },
    http::StatusCode,
};
use shared::models::{ImportReport, MenuItem, MenuItemCreate, MenuItemUpdate};

use crate::auth::CurrentStaff;
use crate::core::ServerState;
use crate::services::{catalog, menu_import};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Multipart field carrying the upload
const FILE_FIELD: &str = "file";

struct UploadedFile {
    file_name: String,
    data: Vec<u8>,
}

/// First `file` field of a multipart body
async fn read_file_field(
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<UploadedFile> {
    let mut multipart = multipart
        .map_err(|e| AppError::with_message(ErrorCode::ImportFileMissing, e.body_text()))?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let data = field.bytes().await?.to_vec();
            return Ok(UploadedFile { file_name, data });
        }
    }

    Err(AppError::with_message(
        ErrorCode::ImportFileMissing,
        format!("No '{FILE_FIELD}' field found in the upload"),
    )
    .with_detail("field", FILE_FIELD))
}

/// GET /admin/menu/
pub async fn list(
    State(state): State<ServerState>,
    staff: CurrentStaff,
) -> AppResult<Json<Vec<MenuItem>>> {
    Ok(Json(catalog::list_items(&state.db, staff.restaurant_id).await?))
}

/// GET /admin/menu/{id}/
pub async fn get_by_id(
    State(state): State<ServerState>,
    staff: CurrentStaff,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItem>> {
    Ok(Json(catalog::get_item(&state.db, staff.restaurant_id, id).await?))
}

/// POST /admin/menu/
pub async fn create(
    State(state): State<ServerState>,
    staff: CurrentStaff,
    payload: Result<Json<MenuItemCreate>, JsonRejection>,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    let Json(payload) = payload?;
    let item = catalog::create_item(&state.db, staff.restaurant_id, payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PATCH /admin/menu/{id}/
pub async fn update(
    State(state): State<ServerState>,
    staff: CurrentStaff,
    Path(id): Path<i64>,
    payload: Result<Json<MenuItemUpdate>, JsonRejection>,
) -> AppResult<Json<MenuItem>> {
    let Json(payload) = payload?;
    Ok(Json(
        catalog::update_item(&state.db, staff.restaurant_id, id, payload).await?,
    ))
}

/// DELETE /admin/menu/{id}/
pub async fn delete(
    State(state): State<ServerState>,
    staff: CurrentStaff,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    catalog::delete_item(&state.db, staff.restaurant_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /admin/menu/{id}/image/
pub async fn upload_image(
    State(state): State<ServerState>,
    staff: CurrentStaff,
    Path(id): Path<i64>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<MenuItem>> {
    let upload = read_file_field(multipart).await?;
    if upload.data.is_empty() {
        return Err(AppError::with_message(ErrorCode::InvalidFormat, "Empty file provided"));
    }
    let item = catalog::set_item_image(
        &state.db,
        &state.media,
        staff.restaurant_id,
        id,
        &upload.file_name,
        upload.data,
    )
    .await?;
    Ok(Json(item))
}

/// POST /admin/menu/csv-upload/
pub async fn csv_upload(
    State(state): State<ServerState>,
    staff: CurrentStaff,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<ImportReport>> {
    let upload = read_file_field(multipart).await?;
    tracing::info!(
        staff_id = staff.id,
        file_name = %upload.file_name,
        size = upload.data.len(),
        "Menu CSV received"
    );
    let report = menu_import::import_items(&state.db, staff.restaurant_id, &upload.data).await?;
    Ok(Json(report))
}
