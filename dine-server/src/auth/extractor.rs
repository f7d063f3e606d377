//! CurrentStaff extractor

use axum::{extract::FromRequestParts, http::request::Parts};
use http::{HeaderMap, Uri};

use crate::auth::{CurrentStaff, JwtService, TokenType};
use crate::core::ServerState;
use crate::utils::AppError;

/// Validate the bearer access token in `headers`
pub(crate) fn authenticate(
    headers: &HeaderMap,
    uri: &Uri,
    state: &ServerState,
) -> Result<CurrentStaff, AppError> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{uri}"));
            return Err(AppError::unauthorized());
        }
    };

    let claims = state
        .get_jwt_service()
        .validate_token(token, TokenType::Access)
        .map_err(|e| {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{e}"),
                uri = format!("{uri}")
            );
            AppError::from(e)
        })?;

    CurrentStaff::try_from(claims)
        .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {e}")))
}

/// Reuses the staff inserted by [`require_auth`](crate::auth::require_auth)
/// and falls back to validating the header itself.
impl FromRequestParts<ServerState> for CurrentStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(staff) = parts.extensions.get::<CurrentStaff>() {
            return Ok(staff.clone());
        }

        let staff = authenticate(&parts.headers, &parts.uri, state)?;
        parts.extensions.insert(staff.clone());
        Ok(staff)
    }
}
