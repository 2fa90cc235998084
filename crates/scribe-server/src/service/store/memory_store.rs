//! In-memory store for tests.

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use jiff::Timestamp;
use scribe_postgres::model::{Account, NewAccount, NewPost, Post, UpdatePost};
use scribe_postgres::query::Pagination;
use uuid::Uuid;

use super::{AccountStore, PostStore};
use crate::{Error, Result};

/// Store backed by vectors, enforcing the same uniqueness rules as the schema.
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    accounts: RwLock<Vec<Account>>,
    posts: RwLock<Vec<Post>>,
    fail_lookups: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent email lookup fail with a persistence error.
    pub fn fail_lookups(&self) {
        self.fail_lookups.store(true, Ordering::SeqCst);
    }

    fn now() -> jiff_diesel::Timestamp {
        jiff_diesel::Timestamp::from(Timestamp::now())
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn create_account(&self, new_account: NewAccount) -> Result<Account> {
        let mut accounts = self.accounts.write().expect("accounts lock poisoned");

        if accounts.iter().any(|a| a.username == new_account.username) {
            return Err(Error::duplicate_account(
                "unique constraint violated: accounts_username_unique_idx",
            ));
        }
        if accounts
            .iter()
            .any(|a| a.email_address == new_account.email_address)
        {
            return Err(Error::duplicate_account(
                "unique constraint violated: accounts_email_address_unique_idx",
            ));
        }

        let account = Account {
            id: new_account.id,
            username: new_account.username,
            email_address: new_account.email_address,
            password_hash: new_account.password_hash,
            created_at: Self::now(),
            updated_at: Self::now(),
            deleted_at: None,
        };

        accounts.push(account.clone());
        Ok(account)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(Error::persistence("connection refused"));
        }

        let email = email.trim().to_lowercase();
        let accounts = self.accounts.read().expect("accounts lock poisoned");
        Ok(accounts
            .iter()
            .find(|a| a.email_address == email && a.deleted_at.is_none())
            .cloned())
    }

    async fn list_accounts(&self, pagination: Pagination) -> Result<Vec<Account>> {
        let accounts = self.accounts.read().expect("accounts lock poisoned");
        Ok(accounts
            .iter()
            .rev()
            .filter(|a| a.deleted_at.is_none())
            .skip(pagination.skip())
            .take(pagination.take())
            .cloned()
            .collect())
    }

    async fn count_accounts(&self) -> Result<i64> {
        let accounts = self.accounts.read().expect("accounts lock poisoned");
        let count = accounts.iter().filter(|a| a.deleted_at.is_none()).count();
        Ok(count as i64)
    }

    async fn purge_accounts(&self) -> Result<usize> {
        let mut accounts = self.accounts.write().expect("accounts lock poisoned");
        let purged = accounts.len();
        accounts.clear();
        Ok(purged)
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn create_post(&self, new_post: NewPost) -> Result<Post> {
        let post = Post {
            id: new_post.id,
            title: new_post.title,
            content: new_post.content,
            created_at: Self::now(),
            updated_at: Self::now(),
            deleted_at: None,
        };

        self.posts
            .write()
            .expect("posts lock poisoned")
            .push(post.clone());
        Ok(post)
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        let posts = self.posts.read().expect("posts lock poisoned");
        Ok(posts
            .iter()
            .find(|p| p.id == post_id && p.deleted_at.is_none())
            .cloned())
    }

    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>> {
        let posts = self.posts.read().expect("posts lock poisoned");
        Ok(posts
            .iter()
            .rev()
            .filter(|p| p.deleted_at.is_none())
            .skip(pagination.skip())
            .take(pagination.take())
            .cloned()
            .collect())
    }

    async fn update_post(&self, post_id: Uuid, changes: UpdatePost) -> Result<Option<Post>> {
        let mut posts = self.posts.write().expect("posts lock poisoned");
        let Some(post) = posts
            .iter_mut()
            .find(|p| p.id == post_id && p.deleted_at.is_none())
        else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(content) = changes.content {
            post.content = content;
        }
        post.updated_at = Self::now();

        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        let mut posts = self.posts.write().expect("posts lock poisoned");
        let Some(post) = posts
            .iter_mut()
            .find(|p| p.id == post_id && p.deleted_at.is_none())
        else {
            return Ok(None);
        };

        post.deleted_at = Some(Self::now());
        Ok(Some(post.clone()))
    }
}
