//! Blog post management.

use std::fmt;
use std::sync::Arc;

use scribe_postgres::model::{NewPost, Post, UpdatePost};
use scribe_postgres::query::Pagination;
use uuid::Uuid;

use crate::service::store::PostStore;
use crate::{Error, Result};

/// Tracing target for post operations.
const TRACING_TARGET: &str = "scribe_server::service::post";

/// Thin orchestration over the [`PostStore`].
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
}

impl PostService {
    /// Creates a new post service.
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// Creates a post.
    pub async fn create(&self, title: &str, content: &str) -> Result<Post> {
        let post = self.store.create_post(NewPost::new(title, content)).await?;

        tracing::info!(target: TRACING_TARGET, post_id = %post.id, "post created");
        Ok(post)
    }

    /// Lists posts, newest first.
    pub async fn list(&self, pagination: Pagination) -> Result<Vec<Post>> {
        self.store.list_posts(pagination).await
    }

    /// Returns a single post.
    pub async fn get(&self, post_id: Uuid) -> Result<Post> {
        self.store
            .find_post(post_id)
            .await?
            .ok_or_else(|| post_not_found(post_id))
    }

    /// Applies a partial update and returns the updated post.
    pub async fn update(&self, post_id: Uuid, changes: UpdatePost) -> Result<Post> {
        let post = self
            .store
            .update_post(post_id, changes)
            .await?
            .ok_or_else(|| post_not_found(post_id))?;

        tracing::info!(target: TRACING_TARGET, post_id = %post.id, "post updated");
        Ok(post)
    }

    /// Soft-deletes a post.
    pub async fn delete(&self, post_id: Uuid) -> Result<()> {
        self.store
            .delete_post(post_id)
            .await?
            .ok_or_else(|| post_not_found(post_id))?;

        tracing::info!(target: TRACING_TARGET, post_id = %post_id, "post deleted");
        Ok(())
    }
}

impl fmt::Debug for PostService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostService").finish_non_exhaustive()
    }
}

fn post_not_found(post_id: Uuid) -> Error {
    Error::not_found(format!("post {post_id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::service::store::MemoryStore;

    fn service() -> PostService {
        PostService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn create_get_update_delete() -> anyhow::Result<()> {
        let service = service();

        let post = service.create("Hello", "First post").await?;
        assert_eq!(service.get(post.id).await?.title, "Hello");

        let changes = UpdatePost {
            title: Some("Hello, world".to_owned()),
            ..UpdatePost::default()
        };
        let updated = service.update(post.id, changes).await?;
        assert_eq!(updated.title, "Hello, world");
        assert_eq!(updated.content, "First post");

        service.delete(post.id).await?;
        let error = service.get(post.id).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
        Ok(())
    }

    #[tokio::test]
    async fn list_is_newest_first() -> anyhow::Result<()> {
        let service = service();
        service.create("first", "a").await?;
        service.create("second", "b").await?;

        let titles: Vec<String> = service
            .list(Pagination::default())
            .await?
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["second", "first"]);
        Ok(())
    }

    #[tokio::test]
    async fn missing_post_is_not_found() -> anyhow::Result<()> {
        let service = service();
        let missing = Uuid::now_v7();

        assert_eq!(
            service.get(missing).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            service
                .update(missing, UpdatePost::default())
                .await
                .unwrap_err()
                .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            service.delete(missing).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
        Ok(())
    }

    #[tokio::test]
    async fn deleted_post_cannot_be_deleted_again() -> anyhow::Result<()> {
        let service = service();
        let post = service.create("gone", "soon").await?;

        service.delete(post.id).await?;
        let error = service.delete(post.id).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
        Ok(())
    }
}
