//! Blog post handlers.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;

use crate::extract::{Json, Path, Query, ValidateJson};
use crate::handler::Result;
use crate::handler::request::{CreatePost, Pagination, PostPathParams, UpdatePost};
use crate::handler::response::{PostDeleted, PostEnvelope, Posts};
use crate::service::{PostService, ServiceState};

/// Tracing target for post operations.
const TRACING_TARGET: &str = "scribe_server::handler::posts";

/// Lists posts, newest first.
#[tracing::instrument(skip_all)]
async fn list_posts(
    State(post_service): State<PostService>,
    Query(pagination): Query<Pagination>,
) -> Result<(StatusCode, Json<Posts>)> {
    let posts = post_service.list(pagination.into()).await?;

    tracing::debug!(target: TRACING_TARGET, post_count = posts.len(), "posts listed");
    Ok((StatusCode::OK, Json(Posts::from_models(posts))))
}

/// Creates a post.
#[tracing::instrument(skip_all)]
async fn create_post(
    State(post_service): State<PostService>,
    ValidateJson(request): ValidateJson<CreatePost>,
) -> Result<(StatusCode, Json<PostEnvelope>)> {
    let post = post_service.create(&request.title, &request.content).await?;
    Ok((StatusCode::CREATED, Json(PostEnvelope::from_model(post))))
}

/// Returns a single post.
#[tracing::instrument(skip_all, fields(post_id = %path_params.post_id))]
async fn read_post(
    State(post_service): State<PostService>,
    Path(path_params): Path<PostPathParams>,
) -> Result<(StatusCode, Json<PostEnvelope>)> {
    let post = post_service.get(path_params.post_id).await?;
    Ok((StatusCode::OK, Json(PostEnvelope::from_model(post))))
}

/// Updates the title and/or content of a post.
#[tracing::instrument(skip_all, fields(post_id = %path_params.post_id))]
async fn update_post(
    State(post_service): State<PostService>,
    Path(path_params): Path<PostPathParams>,
    ValidateJson(request): ValidateJson<UpdatePost>,
) -> Result<(StatusCode, Json<PostEnvelope>)> {
    let post = post_service
        .update(path_params.post_id, request.into_model())
        .await?;

    Ok((StatusCode::OK, Json(PostEnvelope::from_model(post))))
}

/// Deletes a post.
#[tracing::instrument(skip_all, fields(post_id = %path_params.post_id))]
async fn delete_post(
    State(post_service): State<PostService>,
    Path(path_params): Path<PostPathParams>,
) -> Result<(StatusCode, Json<PostDeleted>)> {
    post_service.delete(path_params.post_id).await?;
    Ok((StatusCode::OK, Json(PostDeleted::default())))
}

pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{postId}",
            get(read_post).put(update_post).delete(delete_post),
        )
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::handler::test::{create_test_server_with_state, create_test_state, issue_token};
    use crate::middleware::RouterAuthExt;

    async fn create_server() -> anyhow::Result<(axum_test::TestServer, String)> {
        let state = create_test_state()?;
        let token = issue_token(&state, "alice")?;
        let router = routes().with_authentication(state.clone());
        let server = create_test_server_with_state(router, state).await?;
        Ok((server, token))
    }

    #[tokio::test]
    async fn post_crud_round_trip() -> anyhow::Result<()> {
        let (server, token) = create_server().await?;

        let response = server
            .post("/posts")
            .authorization_bearer(&token)
            .json(&json!({"title": "Hello", "content": "First post"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created = response.json::<PostEnvelope>().post;
        assert_eq!(created.title, "Hello");

        let path = format!("/posts/{}", created.id);

        let response = server.get(&path).authorization_bearer(&token).await;
        response.assert_status_ok();
        assert_eq!(response.json::<PostEnvelope>().post.content, "First post");

        let response = server
            .put(&path)
            .authorization_bearer(&token)
            .json(&json!({"title": "Hello again"}))
            .await;
        response.assert_status_ok();
        let updated = response.json::<PostEnvelope>().post;
        assert_eq!(updated.title, "Hello again");
        assert_eq!(updated.content, "First post");

        let response = server.get("/posts").authorization_bearer(&token).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Posts>().posts.len(), 1);

        let response = server.delete(&path).authorization_bearer(&token).await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Post deleted successfully");

        let response = server.get(&path).authorization_bearer(&token).await;
        response.assert_status_not_found();
        Ok(())
    }

    #[tokio::test]
    async fn posts_are_listed_newest_first() -> anyhow::Result<()> {
        let (server, token) = create_server().await?;

        for title in ["first", "second"] {
            server
                .post("/posts")
                .authorization_bearer(&token)
                .json(&json!({"title": title, "content": "body"}))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let response = server.get("/posts").authorization_bearer(&token).await;
        let titles: Vec<String> = response
            .json::<Posts>()
            .posts
            .into_iter()
            .map(|post| post.title)
            .collect();
        assert_eq!(titles, ["second", "first"]);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_post_id_is_bad_request() -> anyhow::Result<()> {
        let (server, token) = create_server().await?;

        let response = server.get("/posts/not-a-uuid").authorization_bearer(&token).await;
        response.assert_status_bad_request();

        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "bad_request");
        Ok(())
    }

    #[tokio::test]
    async fn missing_post_is_not_found() -> anyhow::Result<()> {
        let (server, token) = create_server().await?;
        let path = format!("/posts/{}", Uuid::now_v7());

        server
            .get(&path)
            .authorization_bearer(&token)
            .await
            .assert_status_not_found();
        server
            .put(&path)
            .authorization_bearer(&token)
            .json(&json!({"content": "new"}))
            .await
            .assert_status_not_found();
        server
            .delete(&path)
            .authorization_bearer(&token)
            .await
            .assert_status_not_found();
        Ok(())
    }

    #[tokio::test]
    async fn invalid_post_body_is_bad_request() -> anyhow::Result<()> {
        let (server, token) = create_server().await?;

        let response = server
            .post("/posts")
            .authorization_bearer(&token)
            .json(&json!({"title": "", "content": "body"}))
            .await;
        response.assert_status_bad_request();

        let response = server
            .post("/posts")
            .authorization_bearer(&token)
            .json(&json!({"title": "only a title"}))
            .await;
        response.assert_status_bad_request();
        Ok(())
    }

    #[tokio::test]
    async fn posts_require_authentication() -> anyhow::Result<()> {
        let (server, _) = create_server().await?;

        server.get("/posts").await.assert_status_unauthorized();
        server
            .post("/posts")
            .json(&json!({"title": "t", "content": "c"}))
            .await
            .assert_status_unauthorized();
        Ok(())
    }
}
