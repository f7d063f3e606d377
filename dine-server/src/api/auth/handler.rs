//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use shared::models::{LoginRequest, RefreshRequest, TokenPair};

use crate::auth::{CurrentStaff, TokenType};
use crate::core::ServerState;
use crate::db::repository::staff;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Fixed delay before answering a login, found or not
const AUTH_FIXED_DELAY_MS: u64 = 500;

fn account_disabled() -> AppError {
    AppError::with_message(ErrorCode::AccountDisabled, "Account has been disabled")
}

/// POST /admin/auth/login/
///
/// Unknown user and wrong password give the same `InvalidCredentials`.
pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<TokenPair>> {
    let Json(req) = payload?;
    let username = req.username.trim();

    let account = staff::find_by_username(&state.db, username).await?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let account = match account {
        Some(account) => {
            let valid = account
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
            if !valid {
                security_log!("WARN", "login_failed", username = username, reason = "invalid_password");
                return Err(AppError::invalid_credentials());
            }
            account
        }
        None => {
            security_log!("WARN", "login_failed", username = username, reason = "user_not_found");
            return Err(AppError::invalid_credentials());
        }
    };

    if !account.is_active {
        security_log!("WARN", "login_disabled", username = username);
        return Err(account_disabled());
    }

    let pair = state.get_jwt_service().issue_pair(account.info())?;
    tracing::info!(
        staff_id = account.id,
        username = %account.username,
        restaurant_id = account.restaurant_id,
        "Staff logged in"
    );
    Ok(Json(pair))
}

/// POST /admin/auth/refresh/
///
/// Exchanges a refresh token for a new pair. The account is reloaded so a
/// disabled or deleted account stops refreshing.
pub async fn refresh(
    State(state): State<ServerState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> AppResult<Json<TokenPair>> {
    let Json(req) = payload?;
    let jwt = state.get_jwt_service();

    let claims = jwt.validate_token(req.refresh.trim(), TokenType::Refresh).map_err(|e| {
        security_log!("WARN", "refresh_failed", error = format!("{e}"));
        AppError::from(e)
    })?;
    let current = CurrentStaff::try_from(claims)?;

    let account = staff::find_by_id(&state.db, current.id)
        .await?
        .ok_or_else(|| AppError::invalid_token("Staff account no longer exists"))?;
    if !account.is_active {
        return Err(account_disabled());
    }

    let pair = jwt.issue_pair(account.info())?;
    tracing::debug!(staff_id = account.id, "Token pair refreshed");
    Ok(Json(pair))
}
