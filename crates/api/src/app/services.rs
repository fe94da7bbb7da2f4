use std::sync::Arc;

use inkpress_auth::User;
use inkpress_core::PostId;
use inkpress_posts::{BlogPost, NewPost, PostPatch};
use inkpress_store::{InMemoryPostStore, InMemoryUserStore, PostStore, StoreError, UserStore};

/// Service facade over the document store.
///
/// Handlers go through this instead of holding the stores themselves, so
/// swapping the in-memory store for a persistent one stays a wiring change.
pub struct AppServices {
    posts: Arc<dyn PostStore>,
    users: Arc<dyn UserStore>,
}

/// Wire the in-memory document store.
pub fn build_services() -> AppServices {
    AppServices::new(
        Arc::new(InMemoryPostStore::new()),
        Arc::new(InMemoryUserStore::new()),
    )
}

impl AppServices {
    pub fn new(posts: Arc<dyn PostStore>, users: Arc<dyn UserStore>) -> Self {
        Self { posts, users }
    }

    pub fn user_store(&self) -> Arc<dyn UserStore> {
        Arc::clone(&self.users)
    }

    pub fn create_user(&self, user: User) -> Result<(), StoreError> {
        self.users.insert(user)
    }

    pub fn posts_list(&self) -> Result<Vec<BlogPost>, StoreError> {
        self.posts.list()
    }

    pub fn posts_get(&self, id: PostId) -> Result<Option<BlogPost>, StoreError> {
        self.posts.get(id)
    }

    pub fn posts_count(&self) -> Result<usize, StoreError> {
        self.posts.count()
    }

    pub fn posts_create(&self, post: NewPost) -> Result<BlogPost, StoreError> {
        self.posts.insert(post)
    }

    pub fn posts_update(&self, id: PostId, patch: PostPatch) -> Result<BlogPost, StoreError> {
        self.posts.update(id, patch)
    }

    pub fn posts_delete(&self, id: PostId) -> Result<(), StoreError> {
        self.posts.delete(id)
    }
}
