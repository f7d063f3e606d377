//! Staff authentication
//!
//! - [`JwtService`] - access/refresh token issuing and validation
//! - [`CurrentStaff`] - authenticated staff context
//! - [`require_auth`] - middleware guarding `/admin/` routes

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentStaff, JwtConfig, JwtError, JwtService, TokenType};
pub use middleware::require_auth;

use crate::utils::AppError;

impl From<JwtError> for AppError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::ExpiredToken => AppError::token_expired(),
            JwtError::GenerationFailed(msg) | JwtError::ConfigError(msg) => AppError::internal(msg),
            _ => AppError::invalid_token("Invalid token"),
        }
    }
}
