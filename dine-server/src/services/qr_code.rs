//! Table QR codes
//!
//! Each registered table gets a PNG QR code pointing diners at the menu
//! page for that restaurant and table. The image is generated once and
//! its media-relative path stored on the table row.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};
use shared::models::DiningTable;
use sqlx::SqliteConnection;
use thiserror::Error;

use crate::db::repository::dining_table;
use crate::services::media::MediaStore;
use crate::utils::{AppError, AppResult, ErrorCode};

/// QR images directory (relative to the media root)
pub const QR_DIR: &str = "qr_codes";

/// Pixel size of one QR module
const MODULE_PIXELS: u32 = 10;

#[derive(Debug, Error)]
pub enum QrError {
    #[error("QR encoding failed: {0:?}")]
    Encode(qrcode::types::QrError),

    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

impl From<QrError> for AppError {
    fn from(err: QrError) -> Self {
        AppError::with_message(ErrorCode::QrCodeFailed, err.to_string())
    }
}

/// Render `data` as a black-on-white PNG (error correction L, 4-module quiet zone)
pub fn render_png(data: &str) -> Result<Vec<u8>, QrError> {
    let code =
        QrCode::with_error_correction_level(data.as_bytes(), EcLevel::L).map_err(QrError::Encode)?;
    let image = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
        .quiet_zone(true)
        .build();

    let mut bytes = Vec::new();
    DynamicImage::ImageLuma8(image).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Generates and stores table QR codes
#[derive(Debug, Clone)]
pub struct QrCodeService {
    media: MediaStore,
    frontend_base_url: String,
}

impl QrCodeService {
    pub fn new(media: MediaStore, frontend_base_url: impl Into<String>) -> Self {
        Self {
            media,
            frontend_base_url: frontend_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// URL encoded in the QR code of a table
    pub fn menu_url(&self, restaurant_id: i64, number: i64) -> String {
        format!(
            "{}/menu?restaurant_id={restaurant_id}&table={number}",
            self.frontend_base_url
        )
    }

    pub fn file_path(restaurant_id: i64, number: i64) -> String {
        format!("{QR_DIR}/qr_table_{restaurant_id}_{number}.png")
    }

    /// Ensure `table` has a QR image.
    ///
    /// Runs on the caller's connection so the stored path commits together
    /// with the table row. A table that already has a code is returned
    /// unchanged and nothing is written.
    pub async fn provision(
        &self,
        conn: &mut SqliteConnection,
        mut table: DiningTable,
    ) -> AppResult<DiningTable> {
        if table.qr_code.is_some() {
            return Ok(table);
        }

        let payload = self.menu_url(table.restaurant_id, table.number);
        let png = render_png(&payload)?;
        let relative = Self::file_path(table.restaurant_id, table.number);
        self.media.write(&relative, &png).await?;

        dining_table::set_qr_code(&mut *conn, table.id, &relative).await?;
        tracing::info!(
            restaurant_id = table.restaurant_id,
            table_number = table.number,
            path = %relative,
            "Table QR code generated"
        );

        table.qr_code = Some(relative);
        Ok(table)
    }

    /// Delete the stored image of a removed table
    pub async fn discard(&self, table: &DiningTable) {
        if let Some(path) = &table.qr_code {
            self.media.remove(path).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::{seed_restaurant, test_pool};

    #[test]
    fn test_menu_url() {
        let media = MediaStore::new("/tmp/unused");
        let service = QrCodeService::new(media, "http://192.168.1.20:5173/");
        assert_eq!(
            service.menu_url(3, 12),
            "http://192.168.1.20:5173/menu?restaurant_id=3&table=12"
        );
        assert_eq!(QrCodeService::file_path(3, 12), "qr_codes/qr_table_3_12.png");
    }

    #[test]
    fn test_render_png() {
        let png = render_png("http://localhost:5173/menu?restaurant_id=1&table=5").unwrap();
        assert_eq!(image::guess_format(&png).unwrap(), ImageFormat::Png);

        let decoded = image::load_from_memory(&png).unwrap();
        // Square image made of whole modules
        assert_eq!(decoded.width(), decoded.height());
        assert_eq!(decoded.width() % MODULE_PIXELS, 0);
    }

    #[tokio::test]
    async fn test_provision_is_idempotent() {
        let pool = test_pool().await;
        let rid = seed_restaurant(&pool, "Spice Route").await;
        let dir = tempfile::tempdir().unwrap();
        let service = QrCodeService::new(MediaStore::new(dir.path()), "http://localhost:5173");

        let mut conn = pool.acquire().await.unwrap();
        let table = dining_table::insert(&mut *conn, rid, 5).await.unwrap();
        assert!(table.qr_code.is_none());

        let table = service.provision(&mut conn, table).await.unwrap();
        let path = table.qr_code.clone().unwrap();
        assert_eq!(path, format!("qr_codes/qr_table_{rid}_5.png"));
        let file = dir.path().join(&path);
        let first = std::fs::read(&file).unwrap();

        // Second call neither rewrites the file nor changes the row
        std::fs::remove_file(&file).unwrap();
        let again = service.provision(&mut conn, table).await.unwrap();
        assert_eq!(again.qr_code.as_deref(), Some(path.as_str()));
        assert!(!file.exists());
        drop(conn);

        let stored = dining_table::find_by_id(&pool, rid, again.id).await.unwrap().unwrap();
        assert_eq!(stored.qr_code.as_deref(), Some(path.as_str()));
        assert!(!first.is_empty());
    }
}
