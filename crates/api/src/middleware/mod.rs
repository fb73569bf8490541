//! Request middleware.

pub mod auth;

pub use auth::{AuthUser, is_user, verify_token};
