//! Post routes.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde_json::json;

use crate::{AppState, error::ApiError};
use postwall_core::post::{CreatePostInput, PostError};
use postwall_shared::AppError;

/// Read-only post routes.
pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/post/{id}", get(get_post))
}

/// Post routes that mutate the store.
pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/create-post", post(create_post))
        .route("/posts/{id}/like", put(like_post))
        .route("/post/{id}", delete(delete_post))
}

/// Picks the client message for a post error; `fallback` covers
/// validation and store failures.
fn post_error(e: PostError, fallback: &'static str) -> ApiError {
    let message = match &e {
        PostError::InvalidId(_) => "Invalid post ID",
        PostError::NotFound(_) => "Post not found",
        PostError::Validation(_) | PostError::Store(_) => fallback,
    };
    ApiError::new(message, e)
}

/// POST `/create-post`
async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<CreatePostInput>, JsonRejection>,
) -> Response {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            return ApiError::new(
                "Error creating post",
                AppError::Validation(rejection.body_text()),
            )
            .into_response();
        }
    };

    match state.posts.create(input).await {
        Ok(post) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "message": "Post created successfully",
                "data": post,
            })),
        )
            .into_response(),
        Err(e) => post_error(e, "Error creating post").into_response(),
    }
}

/// GET `/posts`
async fn list_posts(State(state): State<AppState>) -> Response {
    match state.posts.list().await {
        Ok(posts) => (
            StatusCode::OK,
            Json(json!({
                "count": posts.len(),
                "status": "success",
                "message": "Posts retrieved successfully",
                "data": posts,
            })),
        )
            .into_response(),
        Err(e) => post_error(e, "Error retrieving posts").into_response(),
    }
}

/// GET `/post/{id}`
///
/// A well-formed but unknown ID answers 200 with `data: null`.
async fn get_post(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.posts.get(&id).await {
        Ok(post) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "message": "Post retrieved successfully",
                "data": post,
            })),
        )
            .into_response(),
        Err(e) => post_error(e, "Error retrieving post").into_response(),
    }
}

/// PUT `/posts/{id}/like`
async fn like_post(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.posts.like(&id).await {
        Ok(post) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "message": "Post liked successfully",
                "data": post,
            })),
        )
            .into_response(),
        Err(e) => post_error(e, "Internal Server Error").into_response(),
    }
}

/// DELETE `/post/{id}`
async fn delete_post(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.posts.delete(&id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "post deleted" }))).into_response(),
        Err(e @ PostError::NotFound(_)) => ApiError::new("post not found", e).into_response(),
        Err(e) => post_error(e, "Error deleting post").into_response(),
    }
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
