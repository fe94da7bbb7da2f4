use chrono::{DateTime, Utc};
use serde::Deserialize;

use inkpress_core::{DomainError, DomainResult};
use inkpress_posts::{Author, BlogPost, NewPost, PostPatch};

// -------------------------
// Request DTOs
// -------------------------

/// Author as sent by clients: `{ "firstName": ..., "lastName": ... }`.
///
/// Both fields are optional at the serde level so field-level problems
/// surface as 400 validation errors rather than body-rejection responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl AuthorDto {
    pub fn into_author(self) -> DomainResult<Author> {
        match (self.first_name, self.last_name) {
            (Some(first), Some(last)) => Ok(Author::new(first, last)),
            _ => Err(DomainError::validation(
                "author requires both firstName and lastName",
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub author: Option<AuthorDto>,
    pub content: Option<String>,
    pub created: Option<DateTime<Utc>>,
}

impl CreatePostRequest {
    pub fn into_new_post(self) -> DomainResult<NewPost> {
        let title = self
            .title
            .ok_or_else(|| DomainError::validation("missing field `title`"))?;
        let author = self
            .author
            .ok_or_else(|| DomainError::validation("missing field `author`"))?
            .into_author()?;
        let content = self
            .content
            .ok_or_else(|| DomainError::validation("missing field `content`"))?;

        NewPost::new(title, author, content, self.created)
    }
}

/// Partial update: absent fields keep their stored values.
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub author: Option<AuthorDto>,
    pub content: Option<String>,
    pub created: Option<DateTime<Utc>>,
}

impl UpdatePostRequest {
    pub fn into_patch(self) -> DomainResult<PostPatch> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(DomainError::validation("title must not be empty"));
            }
        }
        if let Some(content) = &self.content {
            if content.trim().is_empty() {
                return Err(DomainError::validation("content must not be empty"));
            }
        }

        let author = self.author.map(AuthorDto::into_author).transpose()?;

        Ok(PostPatch {
            title: self.title,
            author,
            content: self.content,
            created: self.created,
        })
    }
}

// -------------------------
// Response mapping
// -------------------------

/// Serialize a post for clients. Exactly the keys
/// `id`, `title`, `author`, `content`, `created`; `author` is the derived
/// display string, never the structured value.
pub fn post_to_json(post: &BlogPost) -> serde_json::Value {
    serde_json::json!({
        "id": post.id.to_string(),
        "title": post.title,
        "author": post.author.display_name(),
        "content": post.content,
        "created": post.created.to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpress_core::PostId;

    #[test]
    fn create_request_requires_title() {
        let req = CreatePostRequest {
            title: None,
            author: Some(AuthorDto {
                first_name: Some("Ada".to_string()),
                last_name: Some("Lovelace".to_string()),
            }),
            content: Some("c".to_string()),
            created: None,
        };
        assert!(matches!(
            req.into_new_post().unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[test]
    fn create_request_requires_complete_author() {
        let req = CreatePostRequest {
            title: Some("t".to_string()),
            author: Some(AuthorDto {
                first_name: Some("Ada".to_string()),
                last_name: None,
            }),
            content: Some("c".to_string()),
            created: None,
        };
        assert!(matches!(
            req.into_new_post().unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[test]
    fn update_request_rejects_blank_title() {
        let req = UpdatePostRequest {
            title: Some("   ".to_string()),
            author: None,
            content: None,
            created: None,
        };
        assert!(matches!(
            req.into_patch().unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[test]
    fn post_json_exposes_exactly_the_contract_keys() {
        let post = NewPost::new(
            "t".to_string(),
            Author::new("Ada", "Lovelace"),
            "c".to_string(),
            None,
        )
        .unwrap()
        .into_post(PostId::new());

        let value = post_to_json(&post);
        let obj = value.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["author", "content", "created", "id", "title"]);
        assert_eq!(obj["author"], "Ada Lovelace");
    }
}
