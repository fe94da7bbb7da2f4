//! Blog posts domain module.
//!
//! This crate contains the business rules for blog posts, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod post;

pub use post::{Author, BlogPost, NewPost, PostPatch};
