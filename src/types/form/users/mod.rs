use chrono::NaiveDateTime;
use serde::Serialize;

use crate::schema;
use crate::types::id::{marker::UserMarker, Id};

pub mod login;

/// Public slice of a user row, safe to put in any response body.
#[derive(Debug, Serialize)]
pub struct UserData {
    pub id: Id<UserMarker>,
    pub name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
}

impl From<&schema::User> for UserData {
    fn from(user: &schema::User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

/// One row of `GET /api/users`: a user plus how many posts they own.
#[derive(Debug, Serialize)]
pub struct DirectoryEntry {
    pub id: Id<UserMarker>,
    pub name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
    pub posts: i64,
}

impl From<schema::UserWithPostCount> for DirectoryEntry {
    fn from(row: schema::UserWithPostCount) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
            posts: row.posts,
        }
    }
}
