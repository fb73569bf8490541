//! Authentication types for JWT bearer tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::UserId;

/// JWT claims carried by access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Display name of the principal.
    pub username: String,
    /// Principal role, checked by the `is_user` gate.
    pub role: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, username: &str, role: &str, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            username: username.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        UserId::from_uuid(self.sub)
    }
}

/// Principal info returned by the `/me` endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalInfo {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub username: String,
    /// Role.
    pub role: String,
    /// Token expiration (unix seconds).
    pub expires_at: i64,
}

impl From<&Claims> for PrincipalInfo {
    fn from(claims: &Claims) -> Self {
        Self {
            id: claims.user_id(),
            username: claims.username.clone(),
            role: claims.role.clone(),
            expires_at: claims.exp,
        }
    }
}

#[cfg(test)]
#[path = "jwt_tests.rs"]
mod jwt_tests;
