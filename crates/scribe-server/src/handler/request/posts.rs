//! Post request types.

use scribe_postgres::model::UpdatePost as UpdatePostModel;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload for creating a post.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    /// Title of the post.
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    /// Body of the post.
    #[validate(length(min = 1))]
    pub content: String,
}

/// Request payload for updating a post.
///
/// Omitted fields keep their current value.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePost {
    /// New title of the post.
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    /// New body of the post.
    #[validate(length(min = 1))]
    pub content: Option<String>,
}

impl UpdatePost {
    pub fn into_model(self) -> UpdatePostModel {
        UpdatePostModel {
            title: self.title,
            content: self.content,
            ..Default::default()
        }
    }
}
