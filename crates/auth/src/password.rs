//! Salted one-way password hashing.
//!
//! Plaintext passwords exist only transiently while a request (or setup
//! code) is being handled; only the PHC-format hash is ever stored.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// A salted argon2 hash in PHC string format (salt embedded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Hash a plaintext password with a fresh random salt.
    pub fn hash(plaintext: &str) -> Result<Self, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hash(e.to_string()))?;
        Ok(Self(hash.to_string()))
    }

    /// Wrap an already-hashed PHC string (e.g. loaded from storage).
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// Verify a plaintext candidate against this hash.
    ///
    /// A malformed stored hash verifies as false rather than erroring:
    /// an attacker must not learn whether a record is corrupt.
    pub fn verify(&self, plaintext: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
