//! User records used for authenticating write operations.

use crate::password::{HashedPassword, PasswordError};

/// A stored user.
///
/// # Invariants
/// - `username` is the unique key; the store rejects duplicates.
/// - The password is held only as a salted one-way hash.
///
/// Deliberately not `Serialize`: user records never leave the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password: HashedPassword,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    /// Build a user from a plaintext password, hashing it immediately.
    pub fn create(
        username: impl Into<String>,
        plaintext_password: &str,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, PasswordError> {
        Ok(Self {
            username: username.into(),
            password: HashedPassword::hash(plaintext_password)?,
            first_name: first_name.into(),
            last_name: last_name.into(),
        })
    }

    /// Check a plaintext candidate against the stored hash.
    pub fn verify_password(&self, plaintext: &str) -> bool {
        self.password.verify(plaintext)
    }
}
