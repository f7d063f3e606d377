//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: restaurant, category, menu item
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: usernames, cuisine labels
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Font family names
pub const MAX_FONT_LEN: usize = 50;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Upper bound for a preparation time (one day)
pub const MAX_COOKING_TIME_MINUTES: i32 = 24 * 60;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty"))
            .with_detail("field", field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate a `#RRGGBB` color code.
pub fn validate_hex_color(value: &str, field: &str) -> Result<(), AppError> {
    let valid = value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(AppError::with_message(
            shared::ErrorCode::InvalidTheme,
            format!("{field} must be a #RRGGBB color"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate a preparation time in minutes.
pub fn validate_cooking_time(minutes: i32) -> Result<(), AppError> {
    if !(0..=MAX_COOKING_TIME_MINUTES).contains(&minutes) {
        return Err(AppError::with_message(
            shared::ErrorCode::ValueOutOfRange,
            format!("cooking_time_minutes must be between 0 and {MAX_COOKING_TIME_MINUTES}"),
        )
        .with_detail("field", "cooking_time_minutes"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Paneer Tikka", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        let long = "x".repeat(MAX_NAME_LEN + 1);
        let err = validate_required_text(&long, "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "description", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("ok".into()), "description", MAX_NOTE_LEN).is_ok());
        let long = Some("x".repeat(MAX_NOTE_LEN + 1));
        assert!(validate_optional_text(&long, "description", MAX_NOTE_LEN).is_err());
    }

    #[test]
    fn test_hex_color() {
        assert!(validate_hex_color("#2563eb", "primary_color").is_ok());
        assert!(validate_hex_color("#FFFFFF", "primary_color").is_ok());
        assert!(validate_hex_color("2563eb", "primary_color").is_err());
        assert!(validate_hex_color("#2563e", "primary_color").is_err());
        let err = validate_hex_color("#zzzzzz", "background_color").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTheme);
    }

    #[test]
    fn test_cooking_time() {
        assert!(validate_cooking_time(0).is_ok());
        assert!(validate_cooking_time(25).is_ok());
        assert!(validate_cooking_time(-1).is_err());
        assert!(validate_cooking_time(MAX_COOKING_TIME_MINUTES + 1).is_err());
    }
}
