//! Integration tests for the Postgres post store.
//!
//! Run against the migrated database named by `DATABASE_URL` (or
//! `POSTWALL__DATABASE__URL`); each test returns early when neither is set.
//!
//! ```text
//! cargo run -p postwall-migrator -- up
//! cargo test -p postwall-db
//! ```

use std::sync::Arc;

use futures::future::join_all;
use postwall_core::post::{NewPost, PostStore};
use postwall_db::PostRepository;
use postwall_shared::types::PostId;
use sea_orm::Database;

fn get_database_url() -> Option<String> {
    std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("POSTWALL__DATABASE__URL"))
        .ok()
}

/// Connects when a database URL is configured.
async fn repo() -> Option<PostRepository> {
    let Some(url) = get_database_url() else {
        eprintln!("DATABASE_URL not set, skipping Postgres test");
        return None;
    };
    let db = Database::connect(&url)
        .await
        .expect("Failed to connect to database");
    Some(PostRepository::new(db))
}

fn new_post(username: &str) -> NewPost {
    NewPost {
        username: username.to_string(),
        post_description: "integration test post".to_string(),
        post_image: "https://img.example/test.png".to_string(),
    }
}

#[tokio::test]
async fn test_post_create_and_find() {
    let Some(repo) = repo().await else { return };

    let created = repo.create(new_post("alice")).await.expect("create");
    assert_eq!(created.likes, 0);
    assert_eq!(created.username, "alice");

    let found = repo
        .find_by_id(created.id)
        .await
        .expect("find")
        .expect("post exists");
    assert_eq!(found.id, created.id);
    assert_eq!(found.post_description, created.post_description);
    assert_eq!(found.likes, 0);
}

#[tokio::test]
async fn test_post_find_unknown_is_none() {
    let Some(repo) = repo().await else { return };
    assert!(repo.find_by_id(PostId::new()).await.expect("find").is_none());
}

#[tokio::test]
async fn test_post_find_all_contains_created() {
    let Some(repo) = repo().await else { return };
    let a = repo.create(new_post("list-a")).await.expect("create");
    let b = repo.create(new_post("list-b")).await.expect("create");

    let all = repo.find_all().await.expect("find_all");
    let pos_a = all.iter().position(|p| p.id == a.id).expect("a listed");
    let pos_b = all.iter().position(|p| p.id == b.id).expect("b listed");
    assert!(pos_a < pos_b);
}

#[tokio::test]
async fn test_post_increment_likes() {
    let Some(repo) = repo().await else { return };
    let post = repo.create(new_post("liker")).await.expect("create");

    let liked = repo
        .increment_likes(post.id)
        .await
        .expect("increment")
        .expect("post exists");
    assert_eq!(liked.likes, 1);
    assert!(liked.updated_at >= post.updated_at);

    assert!(repo.increment_likes(PostId::new()).await.expect("increment").is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_post_concurrent_likes() {
    let Some(repo) = repo().await else { return };
    let repo = Arc::new(repo);
    let post = repo.create(new_post("popular")).await.expect("create");
    let id = post.id;

    let tasks = (0..100).map(|_| {
        let repo = Arc::clone(&repo);
        tokio::spawn(async move { repo.increment_likes(id).await })
    });
    for result in join_all(tasks).await {
        result.expect("task").expect("increment").expect("post exists");
    }

    let after = repo.find_by_id(id).await.expect("find").expect("post exists");
    assert_eq!(after.likes, 100);
}

#[tokio::test]
async fn test_post_delete() {
    let Some(repo) = repo().await else { return };
    let post = repo.create(new_post("gone")).await.expect("create");

    assert_eq!(repo.delete_by_id(post.id).await.expect("delete"), 1);
    assert_eq!(repo.delete_by_id(post.id).await.expect("delete"), 0);
    assert!(repo.find_by_id(post.id).await.expect("find").is_none());
}
