//! Authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::extractor::authenticate;
use crate::core::ServerState;
use crate::utils::AppError;

/// Paths under `/admin/` reachable without a token
const PUBLIC_ADMIN_PREFIX: &str = "/admin/auth/";

/// Require a valid access token on `/admin/` routes.
///
/// On success the [`CurrentStaff`](crate::auth::CurrentStaff) is inserted
/// into the request extensions for handlers to extract.
///
/// Skipped for:
/// - `OPTIONS *` (CORS preflight)
/// - everything outside `/admin/` (public diner API, media, health)
/// - `/admin/auth/*` (login, refresh)
///
/// | Failure | Code |
/// |---------|------|
/// | no `Authorization` header | 401 `NotAuthenticated` |
/// | expired token | 401 `TokenExpired` |
/// | anything else | 401 `TokenInvalid` |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path();
    if !path.starts_with("/admin/") || path.starts_with(PUBLIC_ADMIN_PREFIX) {
        return Ok(next.run(req).await);
    }

    let staff = authenticate(req.headers(), req.uri(), &state)?;
    req.extensions_mut().insert(staff);
    Ok(next.run(req).await)
}
