//! Post store contract.

use async_trait::async_trait;
use postwall_shared::types::PostId;

use super::error::PostError;
use super::types::{NewPost, Post};

/// Persistence for posts.
///
/// Implemented by the db crate for Postgres and by [`super::InMemoryPostStore`].
/// Implementations assign `id`, `likes = 0` and both timestamps on create.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Persist a new post.
    async fn create(&self, input: NewPost) -> Result<Post, PostError>;

    /// All posts in the store's natural (creation) order.
    async fn find_all(&self) -> Result<Vec<Post>, PostError>;

    /// Find a post by ID.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError>;

    /// Add one like and refresh `updated_at` as a single store-side operation.
    ///
    /// Returns `None` if no post has this ID.
    async fn increment_likes(&self, id: PostId) -> Result<Option<Post>, PostError>;

    /// Hard-delete a post, returning the number of rows removed.
    async fn delete_by_id(&self, id: PostId) -> Result<u64, PostError>;
}
