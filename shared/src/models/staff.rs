//! Staff Model

use serde::{Deserialize, Serialize};

/// Staff account response (without password)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffInfo {
    pub id: i64,
    pub username: String,
    pub restaurant_id: i64,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Refresh request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Access/refresh token pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
    /// Seconds until the access token expires
    pub expires_in: i64,
    pub staff: StaffInfo,
}
