use chrono::NaiveDateTime;
use sqlx::FromRow;

use crate::{
    database::{Connection, ErrorExt, Result},
    types::id::{
        marker::{PostMarker, UserMarker},
        Id,
    },
};

#[derive(Debug, FromRow, PartialEq, Eq)]
pub struct Post {
    pub id: Id<PostMarker>,
    pub created_at: NaiveDateTime,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub author_id: Id<UserMarker>,
    pub updated_at: Option<NaiveDateTime>,
}

/// A post joined with the public columns of its author. The password
/// hash is deliberately not selected.
#[derive(Debug, FromRow)]
pub struct PostWithAuthor {
    pub id: Id<PostMarker>,
    pub created_at: NaiveDateTime,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub author_id: Id<UserMarker>,
    pub updated_at: Option<NaiveDateTime>,
    pub author_name: String,
    pub author_email: String,
    pub author_created_at: NaiveDateTime,
}

const SELECT_WITH_AUTHOR: &str = r#"
    SELECT p.id, p.created_at, p.title, p.content, p.published, p.author_id, p.updated_at,
           u.name AS author_name, u.email AS author_email, u.created_at AS author_created_at
    FROM "posts" p
    INNER JOIN "users" u ON u.id = p.author_id
"#;

impl Post {
    #[tracing::instrument(skip(conn))]
    pub async fn all(conn: &mut Connection) -> Result<Vec<PostWithAuthor>> {
        let query = format!("{SELECT_WITH_AUTHOR} ORDER BY p.created_at DESC");
        sqlx::query_as::<_, PostWithAuthor>(&query)
            .fetch_all(conn)
            .await
            .into_db_error()
    }

    #[tracing::instrument(skip(conn))]
    pub async fn by_id(conn: &mut Connection, id: Id<PostMarker>) -> Result<Option<PostWithAuthor>> {
        let query = format!("{SELECT_WITH_AUTHOR} WHERE p.id = $1");
        sqlx::query_as::<_, PostWithAuthor>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
            .into_db_error()
    }

    #[tracing::instrument(skip(conn, content))]
    pub async fn create(
        conn: &mut Connection,
        title: &str,
        content: &str,
        author_id: Id<UserMarker>,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"INSERT INTO "posts" (title, content, author_id)
               VALUES ($1, $2, $3)
               RETURNING *"#,
        )
        .bind(title)
        .bind(content)
        .bind(author_id)
        .fetch_one(conn)
        .await
        .into_db_error()
    }

    /// Writes the full new state of the post. The caller resolves
    /// what `published` should be before getting here.
    #[tracing::instrument(skip(conn, content))]
    pub async fn update(
        conn: &mut Connection,
        id: Id<PostMarker>,
        title: &str,
        content: &str,
        published: bool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"UPDATE "posts"
               SET title = $2, content = $3, published = $4, updated_at = NOW()
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(title)
        .bind(content)
        .bind(published)
        .fetch_optional(conn)
        .await
        .into_db_error()
    }

    #[tracing::instrument(skip(conn))]
    pub async fn delete(conn: &mut Connection, id: Id<PostMarker>) -> Result<Option<Id<PostMarker>>> {
        sqlx::query_scalar::<_, Id<PostMarker>>(
            r#"DELETE FROM "posts" WHERE id = $1 RETURNING id"#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await
        .into_db_error()
    }
}
