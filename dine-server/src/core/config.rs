use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};
use crate::services::restaurant::BootstrapAccount;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Working directory |
/// | HTTP_PORT | 8000 | HTTP port |
/// | DATABASE_PATH | `<WORK_DIR>/dine.db` | SQLite file |
/// | MEDIA_DIR | `<WORK_DIR>/media` | QR codes and menu images |
/// | FRONTEND_BASE_URL | http://localhost:5173 | Diner app origin encoded in QR codes |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | Default level when `RUST_LOG` is unset |
/// | LOG_JSON | true in production | JSON log lines |
/// | LOG_DIR | (unset) | Daily rolling log files instead of stdout |
/// | MAX_UPLOAD_BYTES | 5242880 | Request body limit for uploads |
/// | MAX_CONNECTIONS | 1000 | Concurrent request limit |
/// | REQUEST_TIMEOUT_MS | 30000 | Per-request timeout |
/// | JWT_* | see [`JwtConfig::from_env`] | Staff token settings |
/// | BOOTSTRAP_RESTAURANT_NAME | My Restaurant | First-run restaurant |
/// | BOOTSTRAP_ADMIN_USERNAME / _PASSWORD | (unset) | First-run staff account |
///
/// ```ignore
/// WORK_DIR=/srv/dine HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub http_port: u16,
    pub database_path: String,
    pub media_dir: String,
    pub frontend_base_url: String,
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub max_upload_bytes: usize,
    pub max_connections: usize,
    pub request_timeout_ms: u64,
    pub jwt: JwtConfig,
    pub bootstrap: Option<BootstrapAccount>,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from the environment, defaults for unset values
    pub fn from_env() -> Result<Self> {
        let jwt = JwtConfig::from_env().map_err(|e| ServerError::Config(e.to_string()))?;
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let mut config = Self::with_work_dir(work_dir, jwt);

        config.http_port = env_or("HTTP_PORT", config.http_port);
        if let Ok(path) = std::env::var("DATABASE_PATH") {
            config.database_path = path;
        }
        if let Ok(dir) = std::env::var("MEDIA_DIR") {
            config.media_dir = dir;
        }
        if let Ok(url) = std::env::var("FRONTEND_BASE_URL") {
            config.frontend_base_url = url;
        }
        config.environment = std::env::var("ENVIRONMENT").unwrap_or(config.environment);
        config.log_level = std::env::var("LOG_LEVEL").unwrap_or(config.log_level);
        config.log_json = env_or("LOG_JSON", config.is_production());
        config.log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty());
        config.max_upload_bytes = env_or("MAX_UPLOAD_BYTES", config.max_upload_bytes);
        config.max_connections = env_or("MAX_CONNECTIONS", config.max_connections);
        config.request_timeout_ms = env_or("REQUEST_TIMEOUT_MS", config.request_timeout_ms);

        config.bootstrap = match (
            std::env::var("BOOTSTRAP_ADMIN_USERNAME"),
            std::env::var("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Ok(username), Ok(password)) if !username.is_empty() && !password.is_empty() => {
                Some(BootstrapAccount {
                    restaurant_name: std::env::var("BOOTSTRAP_RESTAURANT_NAME")
                        .unwrap_or_else(|_| "My Restaurant".into()),
                    username,
                    password,
                })
            }
            _ => None,
        };

        Ok(config)
    }

    /// Defaults rooted at `work_dir`, without reading the environment
    pub fn with_work_dir(work_dir: impl Into<String>, jwt: JwtConfig) -> Self {
        let work_dir = work_dir.into();
        let root = PathBuf::from(&work_dir);
        Self {
            database_path: root.join("dine.db").to_string_lossy().into_owned(),
            media_dir: root.join("media").to_string_lossy().into_owned(),
            work_dir,
            http_port: 8000,
            frontend_base_url: "http://localhost:5173".into(),
            environment: "development".into(),
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            max_upload_bytes: 5 * 1024 * 1024,
            max_connections: 1000,
            request_timeout_ms: 30_000,
            jwt,
            bootstrap: None,
        }
    }

    /// Create the working and media directories
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)?;
        std::fs::create_dir_all(&self.media_dir)?;
        if let Some(parent) = PathBuf::from(&self.database_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: "x".repeat(32),
            expiration_minutes: 60,
            refresh_expiration_minutes: 1440,
            issuer: "dine-server".into(),
            audience: "dine-admin".into(),
        }
    }

    #[test]
    fn test_defaults_follow_work_dir() {
        let config = Config::with_work_dir("/srv/dine", jwt());
        assert_eq!(config.database_path, "/srv/dine/dine.db");
        assert_eq!(config.media_dir, "/srv/dine/media");
        assert_eq!(config.http_port, 8000);
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
        assert_eq!(config.environment, "development");
        assert!(!config.is_production());
        assert!(config.bootstrap.is_none());
    }

    #[test]
    fn test_ensure_work_dir_structure() {
        let dir = tempfile::tempdir().unwrap();
        let work_dir = dir.path().join("nested");
        let config = Config::with_work_dir(work_dir.to_string_lossy(), jwt());
        config.ensure_work_dir_structure().unwrap();
        assert!(work_dir.join("media").is_dir());
    }
}
