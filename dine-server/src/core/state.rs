//! Shared server state

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::db::DbService;
use crate::services::restaurant::bootstrap;
use crate::services::{MediaStore, QrCodeService};

/// State shared by every handler (cheap to clone)
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    /// SQLite connection pool
    pub db: SqlitePool,
    pub media: MediaStore,
    pub qr: QrCodeService,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, db: SqlitePool) -> Self {
        let media = MediaStore::new(&config.media_dir);
        let qr = QrCodeService::new(media.clone(), config.frontend_base_url.clone());
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            db,
            media,
            qr,
            jwt_service,
        }
    }

    /// Startup sequence:
    /// 1. working directories
    /// 2. database file and migrations
    /// 3. first-run restaurant and staff account (when configured)
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db = DbService::new(&config.database_path).await?;
        let state = Self::new(config.clone(), db.pool);

        if let Some(account) = &config.bootstrap {
            bootstrap(&state.db, account).await?;
        }
        Ok(state)
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
