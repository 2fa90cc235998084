//! Post response types.

use jiff::Timestamp;
use scribe_postgres::model;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a blog post.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique identifier of the post.
    pub id: Uuid,
    /// Title of the post.
    pub title: String,
    /// Body of the post.
    pub content: String,

    /// Timestamp when the post was created.
    pub created_at: Timestamp,
    /// Timestamp when the post was last updated.
    pub updated_at: Timestamp,
}

impl Post {
    pub fn from_model(post: model::Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            created_at: post.created_at.into(),
            updated_at: post.updated_at.into(),
        }
    }
}

impl From<model::Post> for Post {
    #[inline]
    fn from(post: model::Post) -> Self {
        Self::from_model(post)
    }
}

/// Envelope for a single post.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
pub struct PostEnvelope {
    pub post: Post,
}

impl PostEnvelope {
    pub fn from_model(post: model::Post) -> Self {
        Self {
            post: Post::from_model(post),
        }
    }
}

/// List of posts, newest first.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
pub struct Posts {
    pub posts: Vec<Post>,
}

impl Posts {
    pub fn from_models(posts: Vec<model::Post>) -> Self {
        Self {
            posts: posts.into_iter().map(Post::from_model).collect(),
        }
    }
}

/// Confirmation returned after a post is deleted.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
pub struct PostDeleted {
    pub message: String,
}

impl Default for PostDeleted {
    fn default() -> Self {
        Self {
            message: "Post deleted successfully".to_owned(),
        }
    }
}
