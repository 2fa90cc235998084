//! Storage collaborators used by the account and post services.
//!
//! The services depend on these traits rather than on a database client so
//! that they can be exercised against [`MemoryStore`] in tests.

mod pg_store;
#[cfg(test)]
mod memory_store;

use async_trait::async_trait;
use scribe_postgres::model::{Account, NewAccount, NewPost, Post, UpdatePost};
use scribe_postgres::query::Pagination;
use uuid::Uuid;

#[cfg(test)]
pub(crate) use self::memory_store::MemoryStore;
pub use self::pg_store::PgStore;
use crate::Result;

/// Persistence operations for accounts.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persists a new account.
    ///
    /// Fails with `DuplicateAccount` when the username or email is taken.
    async fn create_account(&self, new_account: NewAccount) -> Result<Account>;

    /// Finds an active account by email address. Absence is `Ok(None)`.
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>>;

    /// Lists active accounts, newest first.
    async fn list_accounts(&self, pagination: Pagination) -> Result<Vec<Account>>;

    /// Counts active accounts.
    async fn count_accounts(&self) -> Result<i64>;

    /// Removes every account. Returns the number removed.
    async fn purge_accounts(&self) -> Result<usize>;
}

/// Persistence operations for posts.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Persists a new post.
    async fn create_post(&self, new_post: NewPost) -> Result<Post>;

    /// Finds an active post by id.
    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>>;

    /// Lists active posts, newest first.
    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>>;

    /// Applies a changeset to an active post.
    async fn update_post(&self, post_id: Uuid, changes: UpdatePost) -> Result<Option<Post>>;

    /// Soft-deletes an active post.
    async fn delete_post(&self, post_id: Uuid) -> Result<Option<Post>>;
}
