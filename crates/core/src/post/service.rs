//! Post service.

use std::sync::Arc;

use postwall_shared::types::PostId;
use tracing::{debug, info};

use super::error::PostError;
use super::store::PostStore;
use super::types::{CreatePostInput, Post};

/// Post operations shared by every store backend.
///
/// Owns ID parsing, request validation and not-found mapping; the store only
/// persists.
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
}

impl std::fmt::Debug for PostService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostService").finish_non_exhaustive()
    }
}

impl PostService {
    /// Create a service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// Parse a path segment into a [`PostId`].
    ///
    /// # Errors
    ///
    /// Returns `PostError::InvalidId` if `raw` is not a UUID.
    pub fn parse_post_id(raw: &str) -> Result<PostId, PostError> {
        raw.parse().map_err(|_| PostError::invalid_id(raw))
    }

    /// Validate and persist a new post.
    pub async fn create(&self, input: CreatePostInput) -> Result<Post, PostError> {
        let new_post = input.into_new_post()?;
        let post = self.store.create(new_post).await?;
        info!(post_id = %post.id, username = %post.username, "post created");
        Ok(post)
    }

    /// All posts in creation order.
    pub async fn list(&self) -> Result<Vec<Post>, PostError> {
        let posts = self.store.find_all().await?;
        debug!(count = posts.len(), "posts listed");
        Ok(posts)
    }

    /// Fetch a post; `None` when the ID is well-formed but unknown.
    pub async fn get(&self, raw_id: &str) -> Result<Option<Post>, PostError> {
        let id = Self::parse_post_id(raw_id)?;
        self.store.find_by_id(id).await
    }

    /// Add one like.
    pub async fn like(&self, raw_id: &str) -> Result<Post, PostError> {
        let id = Self::parse_post_id(raw_id)?;
        let post = self
            .store
            .increment_likes(id)
            .await?
            .ok_or(PostError::NotFound(id))?;
        debug!(post_id = %id, likes = post.likes, "post liked");
        Ok(post)
    }

    /// Hard-delete a post.
    pub async fn delete(&self, raw_id: &str) -> Result<(), PostError> {
        let id = Self::parse_post_id(raw_id)?;
        if self.store.delete_by_id(id).await? == 0 {
            return Err(PostError::NotFound(id));
        }
        info!(post_id = %id, "post deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod service_tests;
