//! Utility module
//!
//! - [`AppError`] / [`AppResult`] - application error types (from `shared::error`)
//! - [`logger`] - tracing subscriber setup
//! - [`money`] - 2-decimal price arithmetic
//! - [`validation`] - input validation helpers

pub mod error;
pub mod logger;
pub mod money;
pub mod validation;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
