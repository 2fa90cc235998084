//! PostgreSQL-backed store.

use async_trait::async_trait;
use scribe_postgres::model::{Account, NewAccount, NewPost, Post, UpdatePost};
use scribe_postgres::query::{AccountRepository, Pagination, PostRepository};
use scribe_postgres::{PgClient, PgConn};
use uuid::Uuid;

use super::{AccountStore, PostStore};
use crate::Result;

/// Store implementation over a pooled [`PgClient`].
#[derive(Debug, Clone)]
pub struct PgStore {
    client: PgClient,
}

impl PgStore {
    /// Creates a new store over the given client.
    pub fn new(client: PgClient) -> Self {
        Self { client }
    }

    /// Returns the underlying client.
    #[inline]
    pub fn client(&self) -> &PgClient {
        &self.client
    }

    async fn connection(&self) -> Result<PgConn> {
        Ok(self.client.get_connection().await?)
    }
}

#[async_trait]
impl AccountStore for PgStore {
    async fn create_account(&self, new_account: NewAccount) -> Result<Account> {
        let mut conn = self.connection().await?;
        Ok(conn.create_account(new_account).await?)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        let mut conn = self.connection().await?;
        Ok(conn.find_account_by_email(email).await?)
    }

    async fn list_accounts(&self, pagination: Pagination) -> Result<Vec<Account>> {
        let mut conn = self.connection().await?;
        Ok(conn.list_accounts(pagination).await?)
    }

    async fn count_accounts(&self) -> Result<i64> {
        let mut conn = self.connection().await?;
        Ok(conn.count_accounts().await?)
    }

    async fn purge_accounts(&self) -> Result<usize> {
        let mut conn = self.connection().await?;
        Ok(conn.purge_accounts().await?)
    }
}

#[async_trait]
impl PostStore for PgStore {
    async fn create_post(&self, new_post: NewPost) -> Result<Post> {
        let mut conn = self.connection().await?;
        Ok(conn.create_post(new_post).await?)
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        let mut conn = self.connection().await?;
        Ok(conn.find_post_by_id(post_id).await?)
    }

    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>> {
        let mut conn = self.connection().await?;
        Ok(conn.list_posts(pagination).await?)
    }

    async fn update_post(&self, post_id: Uuid, changes: UpdatePost) -> Result<Option<Post>> {
        let mut conn = self.connection().await?;
        Ok(conn.update_post(post_id, changes).await?)
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        let mut conn = self.connection().await?;
        Ok(conn.delete_post(post_id).await?)
    }
}
