//! Post error types.

use postwall_shared::{AppError, types::PostId};
use thiserror::Error;

/// Post operation errors.
#[derive(Debug, Error)]
pub enum PostError {
    /// Required field missing or empty.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Identifier is not a well-formed post ID.
    #[error("invalid post id: {0}")]
    InvalidId(String),

    /// Well-formed ID with no matching post.
    #[error("post not found: {0}")]
    NotFound(PostId),

    /// Backing store failure.
    #[error("store error: {0}")]
    Store(String),
}

impl PostError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid ID error.
    #[must_use]
    pub fn invalid_id(raw: impl Into<String>) -> Self {
        Self::InvalidId(raw.into())
    }

    /// Create a store error.
    #[must_use]
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}

impl From<PostError> for AppError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::Validation(msg) => Self::Validation(msg),
            PostError::InvalidId(raw) => Self::InvalidId(format!("'{raw}' is not a valid post id")),
            PostError::NotFound(id) => Self::NotFound(format!("post {id}")),
            PostError::Store(msg) => Self::Database(msg),
        }
    }
}
