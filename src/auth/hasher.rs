//! Password hashing and verification.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use super::errors::{AuthError, AuthResult};

/// One-way password hasher (Argon2id, per-hash random salt, default cost).
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password into a PHC-format string.
    ///
    /// # Errors
    ///
    /// * `AuthError::Hashing` - Salt generation or hashing itself failed
    pub fn hash(&self, password: &str) -> AuthResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        Ok(argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| AuthError::Hashing)?
            .to_string())
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// A mismatch is an expected outcome the caller must check, reported as
    /// `AuthError::InvalidCredentials` rather than a panic.
    pub fn verify(&self, hash: &str, password: &str) -> AuthResult<()> {
        let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
        let argon2 = Argon2::default();

        argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)
    }
}
