use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::posts::repo::PostWithAuthor;

/// Request body for creating a post.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

/// Request body for updating a post. A field that is absent keeps its
/// stored value; present-vs-absent is explicit at the type level.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Author fields embedded in a post response.
#[derive(Debug, Serialize)]
pub struct PostAuthor {
    pub id: Uuid,
    pub name: String,
    pub username: String,
}

/// Post as returned to the client, author joined in.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: PostAuthor,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<PostWithAuthor> for PostResponse {
    fn from(row: PostWithAuthor) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            author: PostAuthor {
                id: row.author_id,
                name: row.author_name,
                username: row.author_username,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A blank or absent update value keeps the stored one; it never clears
/// the field.
pub fn merge_field(incoming: Option<String>, current: String) -> String {
    match incoming {
        Some(v) if !v.is_empty() => v,
        _ => current,
    }
}
