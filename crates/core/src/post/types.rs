//! Post types and data structures.

use chrono::{DateTime, Utc};
use postwall_shared::types::PostId;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use super::error::PostError;

/// A stored post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Post ID, assigned by the store.
    pub id: PostId,
    /// Author display name.
    pub username: String,
    /// Post text.
    pub post_description: String,
    /// URL or path of the attached image.
    pub post_image: String,
    /// Like counter.
    pub likes: u64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last mutation time.
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a post that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    /// Author display name.
    pub username: String,
    /// Post text.
    pub post_description: String,
    /// URL or path of the attached image.
    pub post_image: String,
}

impl NewPost {
    /// Builds the stored form with store-assigned fields.
    #[must_use]
    pub fn into_post(self, id: PostId, now: DateTime<Utc>) -> Post {
        Post {
            id,
            username: self.username,
            post_description: self.post_description,
            post_image: self.post_image,
            likes: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Create request body as received from clients.
///
/// Every field is optional on the wire so a missing field surfaces as a
/// validation error instead of a deserialization failure. Unknown fields,
/// including `likes`, are ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostInput {
    /// Author display name.
    #[validate(
        required(message = "username is required"),
        length(min = 1, message = "username must not be empty")
    )]
    pub username: Option<String>,
    /// Post text.
    #[validate(
        required(message = "postDescription is required"),
        length(min = 1, message = "postDescription must not be empty")
    )]
    pub post_description: Option<String>,
    /// URL or path of the attached image.
    #[validate(
        required(message = "postImage is required"),
        length(min = 1, message = "postImage must not be empty")
    )]
    pub post_image: Option<String>,
}

impl CreatePostInput {
    /// Validates the body and converts it into a [`NewPost`].
    ///
    /// # Errors
    ///
    /// Returns `PostError::Validation` listing every failing field.
    pub fn into_new_post(self) -> Result<NewPost, PostError> {
        self.validate().map_err(|e| PostError::validation(describe(&e)))?;

        let (Some(username), Some(post_description), Some(post_image)) =
            (self.username, self.post_description, self.post_image)
        else {
            return Err(PostError::validation("missing required field"));
        };

        Ok(NewPost {
            username,
            post_description,
            post_image,
        })
    }
}

/// Flattens field errors into a stable, comma-separated message.
fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map_or_else(|| format!("{field} is invalid"), ToString::to_string)
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}
