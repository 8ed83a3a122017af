use chrono::NaiveDateTime;
use sha2::Digest;
use sqlx::FromRow;

use crate::{
    database::{Connection, ErrorExt, Result},
    types::id::{marker::UserMarker, Id},
};

#[derive(Debug, FromRow, PartialEq, Eq)]
pub struct User {
    pub id: Id<UserMarker>,
    pub created_at: NaiveDateTime,
    pub name: String,
    pub email: String,
    // Nullable: rows imported from the previous deployment may not
    // have a password until their first login backfills one.
    pub password_hash: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Row of the author directory: a user plus their post count.
#[derive(Debug, FromRow)]
pub struct UserWithPostCount {
    pub id: Id<UserMarker>,
    pub created_at: NaiveDateTime,
    pub name: String,
    pub email: String,
    pub posts: i64,
}

impl User {
    #[tracing::instrument(skip(conn))]
    pub async fn by_id(conn: &mut Connection, id: Id<UserMarker>) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(r#"SELECT * FROM "users" WHERE id = $1"#)
            .bind(id)
            .fetch_optional(conn)
            .await
            .into_db_error()
    }

    #[tracing::instrument(skip(conn, condition), fields(condition = "<hidden>"))]
    pub async fn by_email(conn: &mut Connection, condition: &str) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(r#"SELECT * FROM "users" WHERE email = $1"#)
            .bind(condition)
            .fetch_optional(conn)
            .await
            .into_db_error()
    }

    #[tracing::instrument(skip(conn))]
    pub async fn all_with_post_count(conn: &mut Connection) -> Result<Vec<UserWithPostCount>> {
        sqlx::query_as::<_, UserWithPostCount>(
            r#"SELECT u.id, u.created_at, u.name, u.email, COUNT(p.id) AS posts
               FROM "users" u
               LEFT JOIN "posts" p ON p.author_id = u.id
               GROUP BY u.id
               ORDER BY u.created_at ASC"#,
        )
        .fetch_all(conn)
        .await
        .into_db_error()
    }

    #[tracing::instrument(skip(conn, password_hash), fields(email = "<hidden>"))]
    pub async fn create(
        conn: &mut Connection,
        name: &str,
        email: &str,
        password_hash: Option<&str>,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"INSERT INTO "users" (name, email, password_hash)
               VALUES ($1, $2, $3)
               RETURNING *"#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(conn)
        .await
        .into_db_error()
    }

    /// Backfills a password for a legacy row that has none.
    #[tracing::instrument(skip(conn, password_hash))]
    pub async fn set_password(
        conn: &mut Connection,
        id: Id<UserMarker>,
        password_hash: &str,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"UPDATE "users" SET password_hash = $2, updated_at = NOW()
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(password_hash)
        .fetch_one(conn)
        .await
        .into_db_error()
    }

    /// Deletes the account; owned posts go with it via `ON DELETE
    /// CASCADE`. Returns `None` when the row was already gone.
    #[tracing::instrument(skip(conn))]
    pub async fn delete(conn: &mut Connection, id: Id<UserMarker>) -> Result<Option<Id<UserMarker>>> {
        sqlx::query_scalar::<_, Id<UserMarker>>(
            r#"DELETE FROM "users" WHERE id = $1 RETURNING id"#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await
        .into_db_error()
    }
}

impl User {
    /// Interim scheme carried over until a slow KDF lands: hex-encoded
    /// SHA-512 over `"{email}:{password}"`.
    #[must_use]
    pub fn hash_password(email: &str, password: &str) -> String {
        let mut hasher = sha2::Sha512::default();
        hasher.update(format!("{email}:{password}"));
        hex::encode(hasher.finalize())
    }

    /// Compares the supplied password against the stored hash without
    /// short-circuiting on the first mismatched character. A row
    /// without a stored hash never matches.
    #[must_use]
    pub fn verify_password(&self, password: &str) -> bool {
        let Some(stored) = self.password_hash.as_deref() else {
            return false;
        };

        let attempt = Self::hash_password(&self.email, password);
        if stored.len() != attempt.len() {
            return false;
        }

        let mut matched = true;
        for (a, b) in stored.chars().zip(attempt.chars()) {
            matched = matched && (a == b);
        }
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_hash(password_hash: Option<String>) -> User {
        User {
            id: Id::new(1),
            created_at: chrono::Utc::now().naive_utc(),
            name: "Mona".into(),
            email: "mona@example.com".into(),
            password_hash,
            updated_at: None,
        }
    }

    #[test]
    fn test_verify_password() {
        let hash = User::hash_password("mona@example.com", "correct horse");
        let user = user_with_hash(Some(hash));
        assert!(user.verify_password("correct horse"));
        assert!(!user.verify_password("battery staple"));
        assert!(!user.verify_password(""));
    }

    #[test]
    fn test_hash_is_bound_to_the_email() {
        let hash = User::hash_password("mona@example.com", "correct horse");
        let mut user = user_with_hash(Some(hash));
        user.email = "ahmed@example.com".into();
        assert!(!user.verify_password("correct horse"));
    }

    #[test]
    fn test_missing_hash_never_matches() {
        let user = user_with_hash(None);
        assert!(!user.verify_password("anything"));
    }
}
