use thiserror::Error;

/// Storage-layer error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record matches the given identifier.
    #[error("record not found")]
    NotFound,

    /// A user with the same username already exists.
    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    /// The collection lock was poisoned by a panicking writer.
    #[error("store lock poisoned: {0}")]
    Lock(String),
}
