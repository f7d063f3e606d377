//! Dine Server - QR-code table ordering backend
//!
//! Diners scan the QR code on their table, browse the restaurant's menu and
//! place orders; staff manage the menu, tables and order statuses through
//! the `/admin/` API.
//!
//! # Module layout
//!
//! ```text
//! dine-server/src/
//! ├── core/       # config, state, server, errors
//! ├── auth/       # JWT tokens, auth middleware, CurrentStaff
//! ├── services/   # orders, catalog, CSV import, tables, QR codes, media
//! ├── api/        # HTTP routes and handlers
//! ├── db/         # SQLite pool, migrations, repositories
//! └── utils/      # errors, logging, money, validation
//! ```

// Security logging macro, defined ahead of the modules that use it
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

pub use auth::{CurrentStaff, JwtService};
pub use core::{Config, Server, ServerError, ServerState, build_app};
pub use db::DbService;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::init_logger_with_file;
