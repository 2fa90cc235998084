//! Posts table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Post table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum PostConstraints {
    // Post validation constraints
    #[strum(serialize = "posts_title_length")]
    TitleLength,
    #[strum(serialize = "posts_content_not_empty")]
    ContentNotEmpty,

    // Post unique constraints
    #[strum(serialize = "posts_pkey")]
    PrimaryKey,
}

impl PostConstraints {
    /// Creates a new [`PostConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            PostConstraints::TitleLength | PostConstraints::ContentNotEmpty => {
                ConstraintCategory::Validation
            }
            PostConstraints::PrimaryKey => ConstraintCategory::Uniqueness,
        }
    }
}

impl From<PostConstraints> for String {
    #[inline]
    fn from(val: PostConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for PostConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
