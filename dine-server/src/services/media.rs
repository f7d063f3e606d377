//! Media storage
//!
//! Files live under a single media root and are addressed by a path
//! relative to it (`qr_codes/qr_table_1_5.png`). The same relative path is
//! stored on rows and served read-only under `/media/`.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use uuid::Uuid;

use crate::utils::{AppError, ErrorCode};

/// Public URL prefix for stored media
pub const MEDIA_URL_PREFIX: &str = "/media";

/// Menu item images directory (relative to the media root)
pub const MENU_IMAGE_DIR: &str = "menu_items";

/// Supported upload extensions
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for dish images
const JPEG_QUALITY: u8 = 85;

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute location of a stored file
    pub fn path_of(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn url_of(relative: &str) -> String {
        format!("{MEDIA_URL_PREFIX}/{relative}")
    }

    /// Inverse of [`url_of`](Self::url_of) for uploaded dish images
    pub fn relative_of(url: &str) -> Option<&str> {
        url.strip_prefix(MEDIA_URL_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|rel| rel.starts_with(MENU_IMAGE_DIR) && !rel.contains(".."))
    }

    /// Write `data` at `relative`, creating parent directories
    pub async fn write(&self, relative: &str, data: &[u8]) -> Result<(), AppError> {
        let path = self.path_of(relative);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_message(
                    ErrorCode::StorageError,
                    format!("Failed to create {}: {e}", parent.display()),
                )
            })?;
        }
        tokio::fs::write(&path, data).await.map_err(|e| {
            AppError::with_message(
                ErrorCode::StorageError,
                format!("Failed to write {}: {e}", path.display()),
            )
        })?;
        tracing::debug!(path = %path.display(), size = data.len(), "Media file written");
        Ok(())
    }

    /// Best-effort removal of a stored file
    pub async fn remove(&self, relative: &str) {
        let path = self.path_of(relative);
        if let Err(e) = tokio::fs::remove_file(&path).await
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove media file");
        }
    }

    /// Validate an uploaded dish image, re-encode it as JPEG and store it.
    /// Returns the relative path.
    pub async fn save_menu_image(&self, file_name: &str, data: Vec<u8>) -> Result<String, AppError> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::InvalidFormat,
                    format!("Invalid file extension for: {file_name}"),
                )
            })?;
        if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
            return Err(AppError::with_message(
                ErrorCode::InvalidFormat,
                format!(
                    "Unsupported file format '{ext}'. Supported: {}",
                    SUPPORTED_FORMATS.join(", ")
                ),
            ));
        }

        let jpeg = tokio::task::spawn_blocking(move || compress_to_jpeg(&data))
            .await
            .map_err(|e| AppError::internal(format!("Image task failed: {e}")))??;

        let relative = format!("{MENU_IMAGE_DIR}/{}.jpg", Uuid::new_v4());
        self.write(&relative, &jpeg).await?;
        tracing::info!(original_name = %file_name, path = %relative, size = jpeg.len(), "Menu image stored");
        Ok(relative)
    }
}

fn compress_to_jpeg(data: &[u8]) -> Result<Vec<u8>, AppError> {
    let img: DynamicImage = image::load_from_memory(data).map_err(|e| {
        AppError::with_message(ErrorCode::InvalidFormat, format!("Invalid image: {e}"))
    })?;

    let mut buffer = Vec::new();
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut buffer), JPEG_QUALITY);
    img.to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| AppError::internal(format!("Failed to compress image: {e}")))?;
    Ok(buffer)
}
