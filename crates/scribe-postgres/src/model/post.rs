//! Post model for PostgreSQL database operations.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::posts;

/// A blog post.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Post {
    /// Unique post identifier.
    pub id: Uuid,
    /// Post title (1-255 characters).
    pub title: String,
    /// Post body.
    pub content: String,
    /// Timestamp when the post was created.
    pub created_at: Timestamp,
    /// Timestamp when the post was last updated.
    pub updated_at: Timestamp,
    /// Timestamp when the post was soft-deleted.
    pub deleted_at: Option<Timestamp>,
}

/// Data for creating a new post.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewPost {
    /// Identifier assigned at creation (UUID v7).
    pub id: Uuid,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
}

impl NewPost {
    /// Creates a new post record with a fresh time-ordered identifier.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Data for updating a post. Fields left as `None` are not modified.
#[derive(Debug, Clone, Default, PartialEq, AsChangeset)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdatePost {
    /// New title.
    pub title: Option<String>,
    /// New body.
    pub content: Option<String>,
    /// Modification time, set by the repository.
    pub updated_at: Option<Timestamp>,
}
