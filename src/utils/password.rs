use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::{AppError, AppResult};

/// Hash a password using Argon2id with a per-password random salt.
///
/// The returned PHC string embeds algorithm, parameters, and salt, so it is
/// self-describing for later verification.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("password hashing failed: {e}"),
        })?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against a stored PHC hash string.
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash).map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("stored password hash is malformed: {e}"),
    })?;
    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_is_not_plaintext() {
        let password = "1234";
        let hash = hash_password(password).expect("Failed to hash password");

        assert_ne!(hash, password);
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_verify_password_success() {
        let password = "test_password_123";
        let hash = hash_password(password).expect("Failed to hash password");

        let result = verify_password(password, &hash).expect("Failed to verify password");
        assert!(result);
    }

    #[test]
    fn test_verify_password_failure() {
        let password = "test_password_123";
        let hash = hash_password(password).expect("Failed to hash password");

        let result = verify_password("wrong_password", &hash).expect("Failed to verify password");
        assert!(!result);
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let password = "test_password_123";
        let hash1 = hash_password(password).expect("Failed to hash password");
        let hash2 = hash_password(password).expect("Failed to hash password");

        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);

        // But both should verify correctly
        assert!(verify_password(password, &hash1).unwrap());
        assert!(verify_password(password, &hash2).unwrap());
    }
}
