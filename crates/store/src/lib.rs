//! Document store for blog posts and users.
//!
//! The store is the source of truth. It exposes small query/insert/update/
//! delete primitives behind traits so the HTTP layer never touches the
//! underlying collections directly.

pub mod error;
pub mod posts;
pub mod users;

pub use error::StoreError;
pub use posts::{InMemoryPostStore, PostStore};
pub use users::{InMemoryUserStore, UserStore};
