//! Authentication building blocks: user records, password hashing, and
//! basic-auth credential parsing.

pub mod credentials;
pub mod password;
pub mod user;

pub use credentials::{BasicCredentials, CredentialError};
pub use password::{HashedPassword, PasswordError};
pub use user::User;
