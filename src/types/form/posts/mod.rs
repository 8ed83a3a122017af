use chrono::NaiveDateTime;
use serde::Serialize;

use crate::schema;
use crate::types::id::{
    marker::{PostMarker, UserMarker},
    Id,
};

pub mod create;
pub mod update;

/// Public slice of the author row embedded in post responses. The
/// password hash never leaves the schema type.
#[derive(Debug, Serialize)]
pub struct PostAuthor {
    pub id: Id<UserMarker>,
    pub name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub struct PostData {
    pub id: Id<PostMarker>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub author: PostAuthor,
}

impl From<schema::PostWithAuthor> for PostData {
    fn from(row: schema::PostWithAuthor) -> Self {
        Self {
            id: row.id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            title: row.title,
            content: row.content,
            published: row.published,
            author: PostAuthor {
                id: row.author_id,
                name: row.author_name,
                email: row.author_email,
                created_at: row.author_created_at,
            },
        }
    }
}

impl PostData {
    /// Builds a response from a freshly written post row and the
    /// author that was looked up alongside it.
    #[must_use]
    pub fn from_parts(post: schema::Post, author: &schema::User) -> Self {
        Self {
            id: post.id,
            created_at: post.created_at,
            updated_at: post.updated_at,
            title: post.title,
            content: post.content,
            published: post.published,
            author: PostAuthor {
                id: author.id,
                name: author.name.clone(),
                email: author.email.clone(),
                created_at: author.created_at,
            },
        }
    }
}
