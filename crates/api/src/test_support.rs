//! Shared fixtures for router tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header::AUTHORIZATION},
};
use http_body_util::BodyExt;
use postwall_core::post::{InMemoryPostStore, NewPost, Post, PostError, PostService, PostStore};
use postwall_core::storage::{StorageConfig, StorageProvider, StorageService};
use postwall_shared::config::AuthSettings;
use postwall_shared::types::PostId;
use postwall_shared::{JwtConfig, JwtService};
use tower::ServiceExt;
use uuid::Uuid;

use crate::{AppState, create_router};

pub(crate) const TEST_SECRET: &str = "test-secret-key-for-testing";
pub(crate) const TEST_MAX_FILE_SIZE: u64 = 1024;

/// Store whose backend is always unreachable.
pub(crate) struct FailingPostStore;

#[async_trait]
impl PostStore for FailingPostStore {
    async fn create(&self, _input: NewPost) -> Result<Post, PostError> {
        Err(PostError::store("connection refused"))
    }

    async fn find_all(&self) -> Result<Vec<Post>, PostError> {
        Err(PostError::store("connection refused"))
    }

    async fn find_by_id(&self, _id: PostId) -> Result<Option<Post>, PostError> {
        Err(PostError::store("connection refused"))
    }

    async fn increment_likes(&self, _id: PostId) -> Result<Option<Post>, PostError> {
        Err(PostError::store("connection refused"))
    }

    async fn delete_by_id(&self, _id: PostId) -> Result<u64, PostError> {
        Err(PostError::store("connection refused"))
    }
}

/// Router backed by [`FailingPostStore`].
pub(crate) fn failing_app() -> Router {
    let state = AppState {
        posts: PostService::new(Arc::new(FailingPostStore)),
        ..test_state(false)
    };
    create_router(state)
}

pub(crate) fn test_state(protect_writes: bool) -> AppState {
    let jwt_service = JwtService::new(JwtConfig {
        secret: TEST_SECRET.to_string(),
        access_token_expires_secs: 900,
    });
    let storage = StorageService::from_config(
        StorageConfig::new(StorageProvider::Memory).with_max_file_size(TEST_MAX_FILE_SIZE),
    )
    .expect("memory storage");

    AppState {
        posts: PostService::new(Arc::new(InMemoryPostStore::new())),
        jwt_service: Arc::new(jwt_service),
        storage: Arc::new(storage),
        auth: Arc::new(AuthSettings {
            protect_writes,
            ..AuthSettings::default()
        }),
    }
}

pub(crate) fn test_app(protect_writes: bool) -> (Router, AppState) {
    let state = test_state(protect_writes);
    (create_router(state.clone()), state)
}

pub(crate) fn token(state: &AppState, role: &str) -> String {
    state
        .jwt_service
        .generate_access_token(Uuid::new_v4(), "alice", role)
        .expect("should generate token")
}

pub(crate) fn bearer(token: &str) -> (axum::http::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {token}"))
}

pub(crate) fn post_body() -> String {
    r#"{"username":"alice","postDescription":"hello world","postImage":"https://img.example/a.png"}"#
        .to_string()
}

pub(crate) fn json_request(method: &str, uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

pub(crate) fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub(crate) async fn send(app: &Router, request: Request<Body>) -> (u16, serde_json::Value) {
    let response: Response<Body> = app.clone().oneshot(request).await.unwrap();
    let status = response.status().as_u16();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

/// Creates a post through the router and returns its id.
pub(crate) async fn create_post(app: &Router) -> String {
    let (status, json) = send(app, json_request("POST", "/create-post", post_body())).await;
    assert_eq!(status, 200, "create failed: {json}");
    json["data"]["id"].as_str().unwrap().to_string()
}
