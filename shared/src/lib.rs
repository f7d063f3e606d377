//! Shared types for the dine platform
//!
//! Wire models exchanged with the diner and staff frontends, plus the
//! unified error system used by the server.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
