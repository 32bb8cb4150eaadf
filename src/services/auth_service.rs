//! Password hashing
//!
//! Thin wrappers over bcrypt so hashing failures surface as `AppError::Hash`.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::utils::errors::{AppError, AppResult};

pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST).map_err(|e| AppError::Hash(e.to_string()))
}

pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    verify(password, password_hash).map_err(|e| AppError::Hash(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        // Low cost keeps the test fast
        let hashed = bcrypt::hash("secret123", 4).unwrap();
        assert!(verify_password("secret123", &hashed).unwrap());
        assert!(!verify_password("wrong", &hashed).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(matches!(verify_password("x", "not-a-hash"), Err(AppError::Hash(_))));
    }
}
