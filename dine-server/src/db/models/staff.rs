//! Staff Model

use serde::{Deserialize, Serialize};
use shared::models::StaffInfo;

/// Staff account row (password hash never serialized)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Staff {
    pub id: i64,
    pub restaurant_id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: i64,
}

impl Staff {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    pub fn info(&self) -> StaffInfo {
        StaffInfo {
            id: self.id,
            username: self.username.clone(),
            restaurant_id: self.restaurant_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = Staff::hash_password("s3cret-pass").unwrap();
        let staff = Staff {
            id: 1,
            restaurant_id: 1,
            username: "manager".into(),
            password_hash: hash,
            is_active: true,
            created_at: 0,
        };
        assert!(staff.verify_password("s3cret-pass").unwrap());
        assert!(!staff.verify_password("wrong").unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let a = Staff::hash_password("same").unwrap();
        let b = Staff::hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_not_serialized() {
        let staff = Staff {
            id: 1,
            restaurant_id: 2,
            username: "waiter".into(),
            password_hash: "$argon2id$secret".into(),
            is_active: true,
            created_at: 0,
        };
        let json = serde_json::to_string(&staff).unwrap();
        assert!(!json.contains("argon2"));
    }
}
