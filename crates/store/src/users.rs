use std::collections::HashMap;
use std::sync::RwLock;

use inkpress_auth::User;

use crate::error::StoreError;

/// Read-mostly user collection; records are created during environment
/// setup and afterwards only looked up for authentication.
pub trait UserStore: Send + Sync {
    /// Persist a user. Usernames are unique.
    fn insert(&self, user: User) -> Result<(), StoreError>;

    fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

/// In-memory users collection keyed by username.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for InMemoryUserStore {
    fn insert(&self, user: User) -> Result<(), StoreError> {
        let mut users = self
            .users
            .write()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        if users.contains_key(&user.username) {
            return Err(StoreError::DuplicateUsername(user.username));
        }
        users.insert(user.username.clone(), user);
        Ok(())
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self
            .users
            .read()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        Ok(users.get(username).cloned())
    }
}
