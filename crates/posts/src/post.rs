use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use inkpress_core::{DomainError, DomainResult, PostId};

/// Post author, stored structured and exposed to clients as a single
/// display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Derived display string, e.g. "First Last".
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// A persisted blog post.
///
/// # Invariants
/// - `id` is assigned by the store on insert and never changes.
/// - `title`, `author`, `content` and `created` are always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: PostId,
    pub title: String,
    pub author: Author,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl BlogPost {
    /// Overwrite only the fields present in `patch`; everything else keeps
    /// its prior value.
    pub fn apply_patch(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(created) = patch.created {
            self.created = created;
        }
    }
}

/// A validated, not-yet-persisted blog post. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub author: Author,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl NewPost {
    /// Validate and build a new post. `created` defaults to now when the
    /// caller leaves it unset.
    pub fn new(
        title: String,
        author: Author,
        content: String,
        created: Option<DateTime<Utc>>,
    ) -> DomainResult<Self> {
        if title.trim().is_empty() {
            return Err(DomainError::validation("title must not be empty"));
        }
        if content.trim().is_empty() {
            return Err(DomainError::validation("content must not be empty"));
        }
        if author.first_name.trim().is_empty() || author.last_name.trim().is_empty() {
            return Err(DomainError::validation(
                "author requires both firstName and lastName",
            ));
        }

        Ok(Self {
            title,
            author,
            content,
            created: created.unwrap_or_else(Utc::now),
        })
    }

    /// Materialize as a persisted post under the given id.
    pub fn into_post(self, id: PostId) -> BlogPost {
        BlogPost {
            id,
            title: self.title,
            author: self.author,
            content: self.content,
            created: self.created,
        }
    }
}

/// Partial update: absent fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub author: Option<Author>,
    pub content: Option<String>,
    pub created: Option<DateTime<Utc>>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.content.is_none()
            && self.created.is_none()
    }
}
