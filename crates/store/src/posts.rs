use std::sync::RwLock;

use inkpress_core::PostId;
use inkpress_posts::{BlogPost, NewPost, PostPatch};

use crate::error::StoreError;

/// Query/insert/update/delete primitives over the posts collection.
///
/// Conflicting writes to the same record serialize inside the store; each
/// call completes or fails atomically from the caller's view.
pub trait PostStore: Send + Sync {
    /// Persist a new post, assigning its id.
    fn insert(&self, post: NewPost) -> Result<BlogPost, StoreError>;

    fn get(&self, id: PostId) -> Result<Option<BlogPost>, StoreError>;

    /// All posts in creation order.
    fn list(&self) -> Result<Vec<BlogPost>, StoreError>;

    /// Partial update: only fields present in `patch` are overwritten.
    fn update(&self, id: PostId, patch: PostPatch) -> Result<BlogPost, StoreError>;

    fn delete(&self, id: PostId) -> Result<(), StoreError>;

    fn count(&self) -> Result<usize, StoreError>;
}

/// In-memory posts collection.
///
/// Intended for tests/dev; the collection stays small enough that linear
/// scans beat maintaining an index. Insertion order doubles as creation
/// order for `list`.
#[derive(Debug, Default)]
pub struct InMemoryPostStore {
    posts: RwLock<Vec<BlogPost>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PostStore for InMemoryPostStore {
    fn insert(&self, post: NewPost) -> Result<BlogPost, StoreError> {
        let mut posts = self
            .posts
            .write()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        let post = post.into_post(PostId::new());
        posts.push(post.clone());
        Ok(post)
    }

    fn get(&self, id: PostId) -> Result<Option<BlogPost>, StoreError> {
        let posts = self
            .posts
            .read()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<BlogPost>, StoreError> {
        let posts = self
            .posts
            .read()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        Ok(posts.clone())
    }

    fn update(&self, id: PostId, patch: PostPatch) -> Result<BlogPost, StoreError> {
        let mut posts = self
            .posts
            .write()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound)?;
        post.apply_patch(patch);
        Ok(post.clone())
    }

    fn delete(&self, id: PostId) -> Result<(), StoreError> {
        let mut posts = self
            .posts
            .write()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        let index = posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::NotFound)?;
        posts.remove(index);
        Ok(())
    }

    fn count(&self) -> Result<usize, StoreError> {
        let posts = self
            .posts
            .read()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        Ok(posts.len())
    }
}
