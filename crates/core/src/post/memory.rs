//! In-process post store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use postwall_shared::types::PostId;

use super::error::PostError;
use super::store::PostStore;
use super::types::{NewPost, Post};

/// Post store kept in a sharded concurrent map.
///
/// Likes are incremented while holding the shard write guard, so concurrent
/// likes on one post never lose updates.
#[derive(Debug, Default)]
pub struct InMemoryPostStore {
    posts: DashMap<PostId, Post>,
}

impl InMemoryPostStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored posts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Returns true if no posts are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn create(&self, input: NewPost) -> Result<Post, PostError> {
        let post = input.into_post(PostId::new(), Utc::now());
        self.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_all(&self) -> Result<Vec<Post>, PostError> {
        let mut posts: Vec<Post> = self.posts.iter().map(|entry| entry.value().clone()).collect();
        posts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(posts)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError> {
        Ok(self.posts.get(&id).map(|entry| entry.value().clone()))
    }

    async fn increment_likes(&self, id: PostId) -> Result<Option<Post>, PostError> {
        Ok(self.posts.get_mut(&id).map(|mut entry| {
            let post = entry.value_mut();
            post.likes += 1;
            post.updated_at = Utc::now();
            post.clone()
        }))
    }

    async fn delete_by_id(&self, id: PostId) -> Result<u64, PostError> {
        Ok(u64::from(self.posts.remove(&id).is_some()))
    }
}
