//! # Password hashing and verification — Argon2id
//!
//! The configured development identity never keeps its password in plain text after
//! startup:
//!
//! - [`hash_password`] generates a random salt via [`OsRng`], hashes the plaintext with
//!   the default Argon2id parameters and returns a PHC-format string
//!   (e.g. `$argon2id$v=19$m=19456,t=2,p=1$...`).
//!
//! - [`verify_password`] parses a PHC-format hash and checks the candidate against it.
//!   Returns `Ok(true)` on match, `Ok(false)` on mismatch, or `Err` if the stored hash is
//!   malformed. A match requires the exact original bytes.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use super::AuthError;

/// Hash a password using Argon2id. Returns a PHC-format string.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::PasswordHash(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a PHC-format hash string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AuthError::PasswordHash(format!("Invalid password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("123", &hash).unwrap());
        assert!(!verify_password("1234", &hash).unwrap());
        assert!(!verify_password("", &hash).unwrap());
        assert!(!verify_password("123 ", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(matches!(
            verify_password("123", "not-a-hash"),
            Err(AuthError::PasswordHash(_))
        ));
    }
}
