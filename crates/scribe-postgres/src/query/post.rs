//! Post repository for managing blog posts.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff::Timestamp;
use uuid::Uuid;

use super::Pagination;
use crate::model::{NewPost, Post, UpdatePost};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for post database operations.
///
/// Soft-deleted posts are invisible to every method.
pub trait PostRepository {
    /// Creates a new post.
    fn create_post(&mut self, new_post: NewPost) -> impl Future<Output = PgResult<Post>> + Send;

    /// Finds an active post by its identifier.
    fn find_post_by_id(
        &mut self,
        post_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Post>>> + Send;

    /// Lists active posts, most recent first.
    fn list_posts(
        &mut self,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Post>>> + Send;

    /// Applies a partial update to an active post.
    ///
    /// Returns `None` if the post was not found.
    fn update_post(
        &mut self,
        post_id: Uuid,
        updates: UpdatePost,
    ) -> impl Future<Output = PgResult<Option<Post>>> + Send;

    /// Soft deletes an active post.
    ///
    /// Returns `None` if the post was not found.
    fn delete_post(
        &mut self,
        post_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Post>>> + Send;
}

impl PostRepository for PgConnection {
    async fn create_post(&mut self, new_post: NewPost) -> PgResult<Post> {
        use schema::posts;

        diesel::insert_into(posts::table)
            .values(&new_post)
            .returning(Post::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_post_by_id(&mut self, post_id: Uuid) -> PgResult<Option<Post>> {
        use schema::posts::{self, dsl};

        posts::table
            .filter(dsl::id.eq(post_id))
            .filter(dsl::deleted_at.is_null())
            .select(Post::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_posts(&mut self, pagination: Pagination) -> PgResult<Vec<Post>> {
        use schema::posts::{self, dsl};

        posts::table
            .filter(dsl::deleted_at.is_null())
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Post::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn update_post(
        &mut self,
        post_id: Uuid,
        mut updates: UpdatePost,
    ) -> PgResult<Option<Post>> {
        use schema::posts::{self, dsl};

        updates.updated_at = Some(jiff_diesel::Timestamp::from(Timestamp::now()));

        diesel::update(
            posts::table
                .filter(dsl::id.eq(post_id))
                .filter(dsl::deleted_at.is_null()),
        )
        .set(&updates)
        .returning(Post::as_returning())
        .get_result(self)
        .await
        .optional()
        .map_err(PgError::from)
    }

    async fn delete_post(&mut self, post_id: Uuid) -> PgResult<Option<Post>> {
        use schema::posts::{self, dsl};

        diesel::update(
            posts::table
                .filter(dsl::id.eq(post_id))
                .filter(dsl::deleted_at.is_null()),
        )
        .set(dsl::deleted_at.eq(Some(jiff_diesel::Timestamp::from(Timestamp::now()))))
        .returning(Post::as_returning())
        .get_result(self)
        .await
        .optional()
        .map_err(PgError::from)
    }
}
