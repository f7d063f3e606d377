//! Table registry
//!
//! A table number must be registered for a restaurant before diners can
//! order from it. Registration creates the row and its QR code in one
//! transaction.

use shared::models::DiningTable;
use sqlx::SqlitePool;

use crate::db::repository::{RepoError, dining_table};
use crate::services::media::MediaStore;
use crate::services::qr_code::QrCodeService;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Rows keep the media-relative path; clients get the served URL
fn present(mut table: DiningTable) -> DiningTable {
    table.qr_code = table.qr_code.as_deref().map(MediaStore::url_of);
    table
}

pub async fn list(pool: &SqlitePool, restaurant_id: i64) -> AppResult<Vec<DiningTable>> {
    let tables = dining_table::find_all(pool, restaurant_id).await?;
    Ok(tables.into_iter().map(present).collect())
}

/// Register `number` for the restaurant and provision its QR code
pub async fn register(
    pool: &SqlitePool,
    qr: &QrCodeService,
    restaurant_id: i64,
    number: Option<i64>,
) -> AppResult<DiningTable> {
    let number = number.ok_or_else(|| AppError::required("number"))?;
    if number <= 0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("Table number must be positive, got {number}"),
        )
        .with_detail("field", "number"));
    }

    let mut tx = pool.begin().await?;
    let table = dining_table::insert(&mut *tx, restaurant_id, number)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::with_message(
                ErrorCode::TableNumberExists,
                format!("Table {number} is already registered"),
            )
            .with_detail("field", "number"),
            other => other.into(),
        })?;
    let table = qr.provision(&mut tx, table).await?;
    if let Err(e) = tx.commit().await {
        qr.discard(&table).await;
        return Err(e.into());
    }

    tracing::info!(restaurant_id, table_number = number, table_id = table.id, "Table registered");
    Ok(present(table))
}

/// Remove a table; orders already placed at it are kept
pub async fn remove(
    pool: &SqlitePool,
    qr: &QrCodeService,
    restaurant_id: i64,
    table_id: i64,
) -> AppResult<()> {
    let table = dining_table::find_by_id(pool, restaurant_id, table_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::TableNotFound, format!("Table {table_id} not found"))
        })?;
    if !dining_table::delete(pool, restaurant_id, table_id).await? {
        return Err(AppError::with_message(
            ErrorCode::TableNotFound,
            format!("Table {table_id} not found"),
        ));
    }
    qr.discard(&table).await;

    tracing::info!(restaurant_id, table_number = table.number, table_id, "Table removed");
    Ok(())
}
